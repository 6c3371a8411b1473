//! Static directory of self-help resources and helplines.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Article,
    Video,
    Pdf,
    Tool,
}

impl ResourceType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "article" => Some(Self::Article),
            "video" => Some(Self::Video),
            "pdf" => Some(Self::Pdf),
            "tool" => Some(Self::Tool),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Resource {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub source: &'static str,
    pub url: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    /// Empty means "matches everything".
    #[serde(skip)]
    pub tags: &'static [&'static str],
}

impl Category {
    pub fn matches(&self, resource: &Resource) -> bool {
        self.tags.is_empty() || resource.tags.iter().any(|t| self.tags.contains(t))
    }
}

#[derive(Debug, Serialize)]
pub struct Helpline {
    pub name: &'static str,
    pub description: &'static str,
    pub phone: &'static str,
}

#[derive(Debug, Default)]
pub struct ResourceFilter<'a> {
    pub category: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub query: Option<&'a str>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown resource category '{0}'")]
    UnknownCategory(String),
    #[error("unknown resource type '{0}'")]
    UnknownType(String),
}

pub fn categories() -> &'static [Category] {
    CATEGORIES
}

pub fn helplines() -> &'static [Helpline] {
    HELPLINES
}

pub fn filter_resources(filter: &ResourceFilter<'_>) -> Result<Vec<&'static Resource>, FilterError> {
    let category = match filter.category {
        Some(id) => Some(
            CATEGORIES
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| FilterError::UnknownCategory(id.to_string()))?,
        ),
        None => None,
    };
    let kind = match filter.kind {
        Some(k) => Some(ResourceType::parse(k).ok_or_else(|| FilterError::UnknownType(k.to_string()))?),
        None => None,
    };
    let needle = filter
        .query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    Ok(RESOURCES
        .iter()
        .filter(|r| category.map_or(true, |c| c.matches(r)))
        .filter(|r| kind.map_or(true, |k| r.kind == k))
        .filter(|r| needle.as_deref().map_or(true, |n| text_matches(r, n)))
        .collect())
}

fn text_matches(resource: &Resource, needle: &str) -> bool {
    resource.title.to_lowercase().contains(needle)
        || resource.description.to_lowercase().contains(needle)
        || resource.tags.iter().any(|t| t.contains(needle))
}

static CATEGORIES: &[Category] = &[
    Category { id: "all", label: "All Resources", tags: &[] },
    Category { id: "anxiety", label: "Anxiety & Stress", tags: &["anxiety", "stress", "overthinking"] },
    Category { id: "depression", label: "Low Mood", tags: &["depression", "low mood", "sadness"] },
    Category { id: "sleep", label: "Sleep Help", tags: &["sleep", "rest", "fatigue"] },
    Category { id: "relationships", label: "Relationships", tags: &["relationships", "communication", "social"] },
    Category {
        id: "selfcare",
        label: "Self-Care",
        tags: &["self-care", "self-help", "habits", "health", "self-compassion"],
    },
    Category { id: "india", label: "Indian Resources", tags: &["india"] },
];

static HELPLINES: &[Helpline] = &[
    Helpline { name: "NIMHANS Helpline", description: "24x7 Toll-Free Mental Health Rehabilitation", phone: "080-4611 0007" },
    Helpline { name: "Vandrevala Foundation", description: "24x7 Helpline for Mental Health Counselling", phone: "9999 666 555" },
    Helpline { name: "iCall Helpline (Tata Institute)", description: "Psychosocial Counselling", phone: "022-2552 1111" },
    Helpline { name: "Arpita Suicide Prevention Helpline", description: "Suicide Prevention & Crisis Support", phone: "080-2525 1444" },
    Helpline { name: "AASRA", description: "24x7 Crisis Intervention & Suicide Prevention", phone: "+91 9820466726" },
    Helpline { name: "Mann Saathi Helpline", description: "Maharashtra Mental Health Support", phone: "1800-120-820050" },
];

static RESOURCES: &[Resource] = &[
    Resource {
        id: "1",
        title: "Anxiety Toolkit - Understanding and Managing Anxiety",
        description: "A comprehensive guide from Mind with practical exercises and strategies to manage anxiety in daily life.",
        kind: ResourceType::Pdf,
        source: "Mind.org",
        url: "https://www.mind.org.uk/information-support/types-of-mental-health-problems/anxiety-and-panic-attacks/self-care/",
        tags: &["anxiety", "self-help", "exercises"],
    },
    Resource {
        id: "2",
        title: "Depression Self-help Guide",
        description: "Evidence-based approaches to understand and manage symptoms of depression from the NHS.",
        kind: ResourceType::Pdf,
        source: "NHS",
        url: "https://www.nhs.uk/mental-health/self-help/guides-tools-and-activities/depression-anxiety-self-assessment-quiz/",
        tags: &["depression", "self-help", "healthcare"],
    },
    Resource {
        id: "3",
        title: "How to Stop Overthinking - Practical Techniques",
        description: "Learn practical cognitive techniques to break the cycle of rumination and overthinking from a licensed therapist.",
        kind: ResourceType::Video,
        source: "Therapy in a Nutshell",
        url: "https://www.youtube.com/watch?v=JOwNKAV9_Mg",
        tags: &["overthinking", "anxiety", "cognitive"],
    },
    Resource {
        id: "4",
        title: "The Science of Happiness",
        description: "Explore the scientific research behind what actually makes humans happy and how to apply it to your life.",
        kind: ResourceType::Video,
        source: "AsapSCIENCE",
        url: "https://www.youtube.com/watch?v=oHv6vTKD6lg",
        tags: &["happiness", "science", "positive psychology"],
    },
    Resource {
        id: "5",
        title: "Tiny Buddha: Simple Wisdom for Life's Hard Questions",
        description: "Thoughtful insights on finding peace and meaning in everyday life challenges. Popular blog with practical advice.",
        kind: ResourceType::Article,
        source: "Tiny Buddha",
        url: "https://tinybuddha.com/",
        tags: &["mindfulness", "wisdom", "life challenges"],
    },
    Resource {
        id: "6",
        title: "Mastering Difficult Conversations - Communication Guide",
        description: "A guide to navigating challenging discussions with confidence and empathy, with real-world examples.",
        kind: ResourceType::Article,
        source: "The Mighty",
        url: "https://themighty.com/topic/mental-health/",
        tags: &["communication", "relationships", "social skills"],
    },
    Resource {
        id: "7",
        title: "Sleep Improvement Guide - Evidence-based Strategies",
        description: "Evidence-based strategies for better sleep quality and establishing healthy sleep routines from sleep experts.",
        kind: ResourceType::Pdf,
        source: "Sleep Foundation",
        url: "https://www.sleepfoundation.org/sleep-hygiene",
        tags: &["sleep", "health", "habits"],
    },
    Resource {
        id: "8",
        title: "Breathing Techniques for Instant Calm",
        description: "Learn simple breathing exercises that can help reduce anxiety and stress in minutes. Interactive guide with timers.",
        kind: ResourceType::Tool,
        source: "Calm App",
        url: "https://www.calm.com/breathe",
        tags: &["anxiety", "stress", "breathing", "techniques"],
    },
    Resource {
        id: "9",
        title: "NIMHANS Digital Academy Mental Health Resources",
        description: "Comprehensive mental health resources from India's premier mental health institution, including self-help guides.",
        kind: ResourceType::Pdf,
        source: "NIMHANS",
        url: "https://nimhans.ac.in/pssmhs-nimhans/",
        tags: &["india", "resources", "mental health"],
    },
    Resource {
        id: "10",
        title: "The Happiness Project India",
        description: "India-focused mental health resources and wellness strategies adapted for Indian cultural context.",
        kind: ResourceType::Article,
        source: "The Happiness Project",
        url: "https://www.happinessindexindia.org/",
        tags: &["india", "happiness", "wellness"],
    },
    Resource {
        id: "11",
        title: "Mindfulness Meditation for Beginners",
        description: "A gentle introduction to mindfulness practices with guided sessions suitable for those new to meditation.",
        kind: ResourceType::Video,
        source: "Headspace",
        url: "https://www.youtube.com/watch?v=inpok4MKVLM",
        tags: &["meditation", "mindfulness", "beginners"],
    },
    Resource {
        id: "12",
        title: "YourDost - Online Counseling and Emotional Support",
        description: "India's leading online counseling and emotional wellness platform with expert psychologists and coaches.",
        kind: ResourceType::Tool,
        source: "YourDost",
        url: "https://yourdost.com/",
        tags: &["india", "counseling", "online therapy"],
    },
    Resource {
        id: "13",
        title: "The Body Keeps the Score: Brain, Mind, and Body in Healing Trauma",
        description: "Summary of key insights from the groundbreaking book on how trauma affects the body and mind.",
        kind: ResourceType::Article,
        source: "Very Well Mind",
        url: "https://www.verywellmind.com/the-body-keeps-the-score-summary-5213220",
        tags: &["trauma", "healing", "body-mind connection"],
    },
    Resource {
        id: "14",
        title: "Manas Foundation - Mental Health Resources",
        description: "Delhi-based mental health organization providing culturally sensitive resources for Indian contexts.",
        kind: ResourceType::Pdf,
        source: "Manas Foundation",
        url: "https://manas.org.in/",
        tags: &["india", "mental health", "resources"],
    },
    Resource {
        id: "15",
        title: "Self-Compassion Exercises by Dr. Kristin Neff",
        description: "Practical exercises to develop greater self-compassion from the pioneering researcher in the field.",
        kind: ResourceType::Tool,
        source: "Self-Compassion.org",
        url: "https://self-compassion.org/category/exercises/",
        tags: &["self-compassion", "exercises", "self-care"],
    },
];
