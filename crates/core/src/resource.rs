//! Static lab resources: lab links and tutorial videos.

use serde::Serialize;

const LAB_BASE: &str = "https://www.cloudskillsboost.google/course_templates";

/// One lab link with an optional tutorial video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabResource {
    /// Lab name inside the course
    pub name: String,
    /// Lab URL
    pub link: String,
    /// YouTube video id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl LabResource {
    fn new(name: &str, link: String, video: &str) -> Self {
        Self {
            name: name.to_string(),
            link,
            video: (!video.is_empty()).then(|| video.to_string()),
        }
    }

    /// Watch URL of the tutorial video.
    pub fn video_url(&self) -> Option<String> {
        self.video
            .as_ref()
            .map(|id| format!("https://www.youtube.com/watch?v={}", id))
    }

    /// Embeddable player URL of the tutorial video.
    pub fn embed_url(&self) -> Option<String> {
        self.video
            .as_ref()
            .map(|id| format!("https://www.youtube.com/embed/{}", id))
    }
}

/// Resources grouped under one course title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceGroup {
    /// Course title
    pub title: String,
    /// Labs of the course
    pub labs: Vec<LabResource>,
}

fn challenge(title: &str, template: u32, lab: u32, video: &str) -> ResourceGroup {
    ResourceGroup {
        title: title.to_string(),
        labs: vec![LabResource::new(
            "Challenge Lab",
            format!("{}/{}/labs/{}", LAB_BASE, template, lab),
            video,
        )],
    }
}

/// The resource list of the Study Jams program, one group per course.
pub fn resource_catalog() -> Vec<ResourceGroup> {
    let compute = |lab: u32| format!("{}/754/labs/{}", LAB_BASE, lab);

    vec![
        ResourceGroup {
            title: "The Basics of Google Cloud Compute".to_string(),
            labs: vec![
                LabResource::new("Creating a Virtual Machine", compute(584200), "UnfDTYpP4Ws"),
                LabResource::new("Creating a Persistent Disk", compute(584201), "cYz3thR_Ds8"),
                LabResource::new(
                    "Hosting a Web App on Google Cloud Using Compute Engine",
                    compute(584202),
                    "xCN4_jEAlhQ",
                ),
                LabResource::new("Challenge Lab", compute(584203), "lfPE9wgNcoE"),
            ],
        },
        challenge("Get Started with Cloud Storage", 725, 589889, "9tVdkeqRkv0"),
        challenge("Get Started with Pub/Sub", 728, 594565, "rIEQsK1cGX0"),
        challenge("Get Started with API Gateway", 662, 592577, "N2yLVNGvQNY"),
        challenge("Get Started with Looker", 647, 591377, "2mrIwJpuEGM"),
        challenge("Get Started with Dataplex", 726, 595711, "2mrIwJpuEGM"),
        challenge("Get Started with Google Workspace Tools", 676, 594930, "dDk2luM4EzI"),
        challenge("App Building with AppSheet", 635, 586900, "0VQFSGyKC2U"),
        challenge("Develop with Apps Script and AppSheet", 715, 591613, "0VQFSGyKC2U"),
        challenge("Build a Website on Google Cloud", 638, 592826, "3NUOcaJ_iJs"),
        challenge("Set Up a Google Cloud Network", 641, 594569, "u_25OakBfIs"),
        challenge("Store, Process, and Manage Data on Google Cloud", 658, 595720, "VDGYe5y1gT8"),
        challenge("Cloud Run Functions: 3 Ways", 696, 588177, "SQEMdrLIpXM"),
        challenge("App Engine: 3 Ways", 671, 592581, "8xzsKqTcXiU"),
        challenge("Cloud Speech API: 3 Ways", 700, 595707, "76o98HqpNpw"),
        challenge("Monitoring in Google Cloud", 747, 593357, "rVYuk-qEqhs"),
        challenge("Analyze Speech and Language with Google APIs", 634, 586896, "75FktGg2fSo"),
        challenge("Prompt Design in Vertex AI", 976, 594527, "7yISoZuL2ZQ"),
        challenge("Develop Gen AI Apps with Gemini and Streamlit", 978, 592573, "yBaUwfdC_Nw"),
        ResourceGroup {
            title: "Level 3: Generative AI".to_string(),
            labs: vec![LabResource::new(
                "Complete Level 3 Game",
                "https://www.cloudskillsboost.google/games/5443".to_string(),
                "",
            )],
        },
    ]
}
