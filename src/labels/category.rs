// Topic taxonomy: maps a lesson label to a category and an exam domain.
//
// Matching is keyword based and checked in taxonomy order, so the first
// category with a hit wins. Short keywords (three characters or fewer,
// mostly acronyms like "vm" or "nsg") must match a whole word; longer
// ones match any word that starts with them ("network" hits "networking").

use serde::Serialize;

/// Lesson topic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "App Service")]
    AppService,
    Storage,
    Networking,
    Compute,
    Identity,
    #[serde(rename = "Backup/DR")]
    BackupDr,
    Monitoring,
    Governance,
    Other,
}

/// Exam domain a category is studied under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Domain {
    #[serde(rename = "Identities and Governance")]
    IdentityGovernance,
    Storage,
    Compute,
    #[serde(rename = "Virtual Networking")]
    Networking,
    #[serde(rename = "Monitor and Maintain")]
    MonitorMaintain,
    Unassigned,
}

/// Category keywords, in match priority order.
const TAXONOMY: &[(Category, &[&str])] = &[
    (
        Category::AppService,
        &["app service", "webapp", "function", "container", "aci", "aks"],
    ),
    (
        Category::Storage,
        &["storage", "blob", "file", "queue", "table", "databox", "azcopy"],
    ),
    (
        Category::Networking,
        &[
            "network",
            "vnet",
            "nsg",
            "firewall",
            "gateway",
            "load balancer",
            "vpn",
            "expressroute",
            "peering",
            "dns",
        ],
    ),
    (
        Category::Compute,
        &[
            "vm",
            "vms",
            "virtual machine",
            "vmss",
            "scale set",
            "disk",
            "image",
            "linux",
            "windows",
            "availability",
        ],
    ),
    (
        Category::Identity,
        &[
            "rbac", "aad", "ad", "entra", "identity", "msi", "keyvault", "key vault", "secret",
        ],
    ),
    (
        Category::BackupDr,
        &[
            "backup",
            "recovery",
            "site recovery",
            "vabrf",
            "resilience",
            "ransomware",
            "disaster",
        ],
    ),
    (
        Category::Monitoring,
        &[
            "monitor",
            "alert",
            "log",
            "logs",
            "metrics",
            "application insight",
            "diagnostic",
        ],
    ),
    (
        Category::Governance,
        &["policy", "compliance", "governance", "blueprint", "management"],
    ),
];

impl Category {
    /// Every category, in taxonomy order with `Other` last.
    pub const ALL: [Category; 9] = [
        Category::AppService,
        Category::Storage,
        Category::Networking,
        Category::Compute,
        Category::Identity,
        Category::BackupDr,
        Category::Monitoring,
        Category::Governance,
        Category::Other,
    ];

    /// Categorize free text by the first taxonomy entry with a keyword hit.
    pub fn from_text(text: &str) -> Self {
        let haystack = word_haystack(text);
        for (category, keywords) in TAXONOMY {
            if keywords.iter().any(|kw| keyword_hits(&haystack, kw)) {
                return *category;
            }
        }
        Category::Other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AppService => "App Service",
            Category::Storage => "Storage",
            Category::Networking => "Networking",
            Category::Compute => "Compute",
            Category::Identity => "Identity",
            Category::BackupDr => "Backup/DR",
            Category::Monitoring => "Monitoring",
            Category::Governance => "Governance",
            Category::Other => "Other",
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            Category::Identity | Category::Governance => Domain::IdentityGovernance,
            Category::Storage => Domain::Storage,
            Category::Compute | Category::AppService => Domain::Compute,
            Category::Networking => Domain::Networking,
            Category::Monitoring | Category::BackupDr => Domain::MonitorMaintain,
            Category::Other => Domain::Unassigned,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::IdentityGovernance => "Identities and Governance",
            Domain::Storage => "Storage",
            Domain::Compute => "Compute",
            Domain::Networking => "Virtual Networking",
            Domain::MonitorMaintain => "Monitor and Maintain",
            Domain::Unassigned => "Unassigned",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lowercase words joined by single spaces, padded with a space each side.
fn word_haystack(text: &str) -> String {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    format!(" {} ", words.join(" "))
}

fn keyword_hits(haystack: &str, keyword: &str) -> bool {
    if keyword.chars().count() <= 3 {
        haystack.contains(&format!(" {keyword} "))
    } else {
        haystack.contains(&format!(" {keyword}"))
    }
}
