//! Static keyword dictionaries used by every scoring stage
//!
//! The lexicon is plain data. It is built once behind a `Lazy` and shared
//! read-only by all analyses; changing it means bumping `LEXICON_VERSION`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LEXICON_VERSION: &str = "1.2.0";

/// Industry tags known to the lexicon, in classification tie-break order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    #[default]
    Technology,
    Healthcare,
    Finance,
    Sales,
    Marketing,
}

impl Industry {
    pub const ALL: [Industry; 5] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Sales,
        Industry::Marketing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Healthcare => "healthcare",
            Industry::Finance => "finance",
            Industry::Sales => "sales",
            Industry::Marketing => "marketing",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Industry {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technology" | "tech" | "software" | "engineering" => Ok(Industry::Technology),
            "healthcare" | "health" | "nursing" | "medical" => Ok(Industry::Healthcare),
            "finance" | "accounting" | "banking" => Ok(Industry::Finance),
            "sales" => Ok(Industry::Sales),
            "marketing" => Ok(Industry::Marketing),
            other => Err(format!(
                "Unknown industry: {}. Supported: technology, healthcare, finance, sales, marketing",
                other
            )),
        }
    }
}

/// Tag attached to every keyword record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    ProgrammingLanguages,
    Frameworks,
    CloudPlatforms,
    Databases,
    Devops,
    Methodologies,
    Certifications,
    Specialties,
    Skills,
    Systems,
    Tools,
    Metrics,
    Channels,
    ActionVerb,
    SoftSkill,
    Buzzword,
    TechnicalSkill,
}

/// Weight classes, ordered from most to least valuable to a screener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightClass {
    Certification,
    TechnicalSkill,
    DomainExpertise,
    ActionVerb,
    SoftSkill,
    Buzzword,
}

impl WeightClass {
    pub fn weight(&self) -> f64 {
        match self {
            WeightClass::Certification => 1.8,
            WeightClass::TechnicalSkill => 1.5,
            WeightClass::DomainExpertise => 1.3,
            WeightClass::ActionVerb => 0.8,
            WeightClass::SoftSkill => 0.6,
            WeightClass::Buzzword => 0.3,
        }
    }
}

impl KeywordCategory {
    pub fn weight_class(&self) -> WeightClass {
        match self {
            KeywordCategory::Certifications => WeightClass::Certification,
            KeywordCategory::ProgrammingLanguages
            | KeywordCategory::Frameworks
            | KeywordCategory::CloudPlatforms
            | KeywordCategory::Databases
            | KeywordCategory::Devops
            | KeywordCategory::Tools
            | KeywordCategory::Systems
            | KeywordCategory::TechnicalSkill => WeightClass::TechnicalSkill,
            KeywordCategory::Methodologies
            | KeywordCategory::Specialties
            | KeywordCategory::Skills
            | KeywordCategory::Metrics
            | KeywordCategory::Channels => WeightClass::DomainExpertise,
            KeywordCategory::ActionVerb => WeightClass::ActionVerb,
            KeywordCategory::SoftSkill => WeightClass::SoftSkill,
            KeywordCategory::Buzzword => WeightClass::Buzzword,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight_class().weight()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::ProgrammingLanguages => "programming_languages",
            KeywordCategory::Frameworks => "frameworks",
            KeywordCategory::CloudPlatforms => "cloud_platforms",
            KeywordCategory::Databases => "databases",
            KeywordCategory::Devops => "devops",
            KeywordCategory::Methodologies => "methodologies",
            KeywordCategory::Certifications => "certifications",
            KeywordCategory::Specialties => "specialties",
            KeywordCategory::Skills => "skills",
            KeywordCategory::Systems => "systems",
            KeywordCategory::Tools => "tools",
            KeywordCategory::Metrics => "metrics",
            KeywordCategory::Channels => "channels",
            KeywordCategory::ActionVerb => "action_verb",
            KeywordCategory::SoftSkill => "soft_skill",
            KeywordCategory::Buzzword => "buzzword",
            KeywordCategory::TechnicalSkill => "technical_skill",
        }
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action verb impact tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactTier {
    High,
    Medium,
    Low,
}

impl ImpactTier {
    pub fn multiplier(&self) -> f64 {
        match self {
            ImpactTier::High => 1.2,
            ImpactTier::Medium => 0.8,
            ImpactTier::Low => 0.4,
        }
    }
}

/// One industry's dictionary: category -> canonical terms.
#[derive(Debug, Clone)]
pub struct IndustryProfile {
    pub industry: Industry,
    pub categories: Vec<(KeywordCategory, Terms)>,
}

impl IndustryProfile {
    pub fn terms(&self) -> impl Iterator<Item = (KeywordCategory, &'static str)> + '_ {
        self.categories
            .iter()
            .flat_map(|(category, terms)| terms.iter().map(move |term| (*category, *term)))
    }

    pub fn category_terms(&self, category: KeywordCategory) -> Terms {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, terms)| *terms)
            .unwrap_or(&[])
    }

    pub fn term_count(&self) -> usize {
        self.categories.iter().map(|(_, terms)| terms.len()).sum()
    }
}

/// A requirement every resume in an industry is expected to show.
#[derive(Debug, Clone)]
pub struct CriticalRequirement {
    pub industry: Industry,
    pub category: KeywordCategory,
    pub label: &'static str,
}

pub struct Lexicon {
    pub version: &'static str,
    pub industries: Vec<IndustryProfile>,
    pub action_verbs: Vec<(ImpactTier, Terms)>,
    pub leadership_verbs: &'static [&'static str],
    pub strong_verbs: &'static [&'static str],
    pub buzzwords: &'static [&'static str],
    pub soft_skills: &'static [&'static str],
    pub section_headers: &'static [&'static str],
    pub job_titles: &'static [&'static str],
    pub entry_level_markers: &'static [&'static str],
    pub degree_terms: &'static [&'static str],
    pub critical_requirements: Vec<CriticalRequirement>,
}

impl Lexicon {
    pub fn profile(&self, industry: Industry) -> &IndustryProfile {
        // Every Industry variant has a profile in the builtin lexicon.
        self.industries
            .iter()
            .find(|p| p.industry == industry)
            .unwrap_or(&self.industries[0])
    }

    pub fn requirements_for(&self, industry: Industry) -> impl Iterator<Item = &CriticalRequirement> {
        self.critical_requirements
            .iter()
            .filter(move |r| r.industry == industry)
    }
}

pub static LEXICON: Lazy<Lexicon> = Lazy::new(builtin);

/// The shared, immutable lexicon.
pub fn lexicon() -> &'static Lexicon {
    &LEXICON
}

type Terms = &'static [&'static str];

const TECH_LANGUAGES: Terms = &[
    "javascript", "typescript", "python", "java", "c++", "c#", "ruby", "go", "rust", "swift",
    "kotlin", "php", "scala", "r", "matlab", "perl", "shell", "bash",
];
const TECH_FRAMEWORKS: Terms = &[
    "react", "vue", "angular", "node.js", "express", "django", "flask", "spring", "spring boot",
    "asp.net", "laravel", "rails", "next.js", "nuxt", "svelte", "tensorflow", "pytorch", "keras",
    "scikit-learn", "fastapi",
];
const TECH_CLOUD: Terms = &[
    "aws", "azure", "gcp", "google cloud", "heroku", "digitalocean", "cloudflare", "s3", "ec2",
    "lambda", "dynamodb", "rds", "cloudfront", "kubernetes", "docker",
];
const TECH_DATABASES: Terms = &[
    "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "cassandra", "dynamodb",
    "sql server", "oracle", "sqlite", "mariadb", "couchdb",
];
const TECH_DEVOPS: Terms = &[
    "ci/cd", "jenkins", "github actions", "gitlab ci", "terraform", "ansible", "kubernetes",
    "docker", "helm", "prometheus", "grafana", "datadog", "newrelic",
];
const TECH_METHODOLOGIES: Terms = &[
    "agile", "scrum", "kanban", "tdd", "bdd", "microservices", "restful api", "graphql",
    "event-driven", "domain-driven design", "continuous integration",
];

const HEALTH_CERTIFICATIONS: Terms = &[
    "rn", "bls", "acls", "pals", "cpr", "tncc", "ccrn", "cnor", "crna", "np", "bsn", "msn", "dnp",
    "lpn", "cna", "cma", "emt", "paramedic",
];
const HEALTH_SPECIALTIES: Terms = &[
    "icu", "critical care", "emergency", "pediatrics", "oncology", "cardiology", "telemetry",
    "med-surg", "operating room", "labor and delivery", "nicu", "psychiatric", "geriatric",
    "orthopedic", "neurology",
];
const HEALTH_SKILLS: Terms = &[
    "patient assessment", "iv therapy", "wound care", "medication administration",
    "ventilator management", "hemodynamic monitoring", "triage", "charting",
    "patient education", "infection control", "vital signs monitoring",
];
const HEALTH_SYSTEMS: Terms = &[
    "epic", "cerner", "meditech", "allscripts", "athenahealth", "eclinicalworks",
    "electronic health records", "ehr", "emr", "cpoe", "emar",
];

const FINANCE_SKILLS: Terms = &[
    "financial modeling", "valuation", "dcf", "lbo", "merger and acquisition",
    "financial analysis", "forecasting", "budgeting", "variance analysis", "financial reporting",
    "gaap", "ifrs", "sox compliance", "risk management",
];
const FINANCE_TOOLS: Terms = &[
    "excel", "bloomberg", "capital iq", "factset", "quickbooks", "sap", "oracle", "tableau",
    "power bi", "sql", "python", "r", "vba", "alteryx",
];
const FINANCE_CERTIFICATIONS: Terms = &[
    "cpa", "cfa", "cma", "cia", "frm", "series 7", "series 63", "series 65",
];

const SALES_METRICS: Terms = &[
    "quota attainment", "pipeline generation", "revenue growth", "close rate", "conversion rate",
    "customer acquisition", "retention rate", "upsell", "cross-sell", "deal size", "sales cycle",
];
const SALES_TOOLS: Terms = &[
    "salesforce", "hubspot", "outreach", "salesloft", "linkedin sales navigator", "apollo",
    "zoominfo", "gong", "chorus", "crm", "clari",
];
const SALES_METHODOLOGIES: Terms = &[
    "consultative selling", "solution selling", "challenger sale", "spin selling", "bant",
    "meddic", "sandler", "value selling", "account-based selling",
];

const MARKETING_CHANNELS: Terms = &[
    "seo", "sem", "ppc", "content marketing", "email marketing", "social media",
    "influencer marketing", "affiliate marketing", "video marketing", "podcast",
];
const MARKETING_TOOLS: Terms = &[
    "google analytics", "google ads", "facebook ads", "hubspot", "marketo", "mailchimp",
    "hootsuite", "buffer", "semrush", "ahrefs", "moz", "mixpanel",
];
const MARKETING_METRICS: Terms = &[
    "roi", "roas", "ctr", "conversion rate", "cac", "ltv", "engagement rate", "bounce rate",
    "impressions", "reach", "cpm", "cpc", "cpa",
];

const HIGH_IMPACT_VERBS: Terms = &[
    "achieved", "accelerated", "accomplished", "delivered", "exceeded", "generated", "increased",
    "improved", "launched", "led", "optimized", "pioneered", "spearheaded", "transformed",
    "revolutionized", "scaled", "streamlined",
];
const MEDIUM_IMPACT_VERBS: Terms = &[
    "managed", "developed", "implemented", "created", "built", "designed", "established",
    "executed", "facilitated", "initiated", "organized", "produced", "trained", "directed",
    "mentored",
];
const LOW_IMPACT_VERBS: Terms = &[
    "assisted", "helped", "supported", "contributed", "participated", "involved", "worked",
    "responsible for", "handled", "performed",
];

fn builtin() -> Lexicon {
    use KeywordCategory::*;

    let industries = vec![
        IndustryProfile {
            industry: Industry::Technology,
            categories: vec![
                (ProgrammingLanguages, TECH_LANGUAGES),
                (Frameworks, TECH_FRAMEWORKS),
                (CloudPlatforms, TECH_CLOUD),
                (Databases, TECH_DATABASES),
                (Devops, TECH_DEVOPS),
                (Methodologies, TECH_METHODOLOGIES),
            ],
        },
        IndustryProfile {
            industry: Industry::Healthcare,
            categories: vec![
                (Certifications, HEALTH_CERTIFICATIONS),
                (Specialties, HEALTH_SPECIALTIES),
                (Skills, HEALTH_SKILLS),
                (Systems, HEALTH_SYSTEMS),
            ],
        },
        IndustryProfile {
            industry: Industry::Finance,
            categories: vec![
                (Skills, FINANCE_SKILLS),
                (Tools, FINANCE_TOOLS),
                (Certifications, FINANCE_CERTIFICATIONS),
            ],
        },
        IndustryProfile {
            industry: Industry::Sales,
            categories: vec![
                (Metrics, SALES_METRICS),
                (Tools, SALES_TOOLS),
                (Methodologies, SALES_METHODOLOGIES),
            ],
        },
        IndustryProfile {
            industry: Industry::Marketing,
            categories: vec![
                (Channels, MARKETING_CHANNELS),
                (Tools, MARKETING_TOOLS),
                (Metrics, MARKETING_METRICS),
            ],
        },
    ];

    let requirement = |industry, category, label| CriticalRequirement {
        industry,
        category,
        label,
    };

    Lexicon {
        version: LEXICON_VERSION,
        industries,
        action_verbs: vec![
            (ImpactTier::High, HIGH_IMPACT_VERBS),
            (ImpactTier::Medium, MEDIUM_IMPACT_VERBS),
            (ImpactTier::Low, LOW_IMPACT_VERBS),
        ],
        leadership_verbs: &[
            "led", "spearheaded", "pioneered", "directed", "managed", "mentored", "established",
            "trained",
        ],
        strong_verbs: &[
            "achieved", "improved", "increased", "delivered", "led", "managed", "developed",
            "created", "launched", "optimized", "reduced", "generated", "built", "designed",
            "implemented", "spearheaded", "streamlined", "exceeded", "established", "executed",
        ],
        buzzwords: &[
            "team player", "hard worker", "detail-oriented", "self-motivated", "fast learner",
            "results-driven", "innovative", "dynamic", "passionate", "excellent communication",
            "problem solver", "think outside the box", "synergy", "leverage", "paradigm shift",
        ],
        soft_skills: &[
            "leadership", "communication", "teamwork", "collaboration", "mentoring",
            "problem solving", "critical thinking", "time management", "adaptability",
            "negotiation", "presentation", "stakeholder management",
        ],
        section_headers: &[
            "EXPERIENCE", "EDUCATION", "SKILLS", "SUMMARY", "PROJECTS", "CERTIFICATIONS",
            "AWARDS", "LANGUAGES", "OBJECTIVE", "PROFILE", "EMPLOYMENT", "INTERESTS",
            "REFERENCES", "PUBLICATIONS", "VOLUNTEER", "ACHIEVEMENTS", "CONTACT",
        ],
        job_titles: &[
            "engineer", "developer", "manager", "analyst", "specialist", "coordinator",
            "director", "consultant", "nurse", "associate", "designer", "representative",
            "administrator", "officer", "technician", "scientist", "accountant", "executive",
            "architect", "lead", "supervisor", "assistant", "programmer", "strategist",
            "therapist", "physician", "advisor",
        ],
        entry_level_markers: &[
            "intern", "internship", "volunteer", "trainee", "apprentice", "part-time",
            "student", "fellowship", "co-op",
        ],
        degree_terms: &[
            "bachelor", "bachelors", "bachelor's", "master", "masters", "master's", "b.s.",
            "b.a.", "m.s.", "m.a.", "bs", "ba", "ms", "mba", "phd", "ph.d", "ph.d.", "bsc",
            "msc", "associate degree", "diploma", "degree", "university", "college",
            "institute", "school", "academy", "bsn", "msn",
        ],
        critical_requirements: vec![
            requirement(Industry::Technology, ProgrammingLanguages, "Programming language"),
            requirement(
                Industry::Technology,
                CloudPlatforms,
                "Cloud platform experience (AWS, Azure, GCP)",
            ),
            requirement(
                Industry::Healthcare,
                Certifications,
                "Professional certification (RN, BLS, ACLS, etc.)",
            ),
            requirement(
                Industry::Finance,
                Certifications,
                "Professional certification (CPA, CFA, etc.)",
            ),
            requirement(
                Industry::Sales,
                Tools,
                "CRM platform experience (Salesforce, HubSpot)",
            ),
            requirement(
                Industry::Marketing,
                Tools,
                "Marketing analytics tools (Google Analytics, Google Ads)",
            ),
        ],
    }
}
