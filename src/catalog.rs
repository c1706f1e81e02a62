//! Compiled-in defaults: the initial site configuration and the static portfolio
//! shown whenever remote sync is off or unavailable.

use crate::types::{AgencyInfo, ContactInfo, HeroContent, HeroStats, MediaKind, PortfolioItem, SiteConfig};

/// Local placeholder used when a listed file carries no thumbnail.
pub const PLACEHOLDER_IMAGE: &str = "/jpeg/logo.jpeg";

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            agency: AgencyInfo::default(),
            hero: HeroContent::default(),
            contact: ContactInfo::default(),
            drive: Default::default(),
        }
    }
}

impl Default for AgencyInfo {
    fn default() -> Self {
        Self {
            name: "Digital Craft Productions".to_string(),
            tagline: "Elevating Brands Through Digital Excellence".to_string(),
            logo: None,
        }
    }
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            title_prefix: "We Create Digital Experiences That".to_string(),
            subtitle: "Video production, web development, branding and social media for businesses across Nepal.".to_string(),
            stats: HeroStats::default(),
        }
    }
}

impl Default for HeroStats {
    fn default() -> Self {
        Self { clients: 150, projects: 300, experience: 5, active_projects: 12 }
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            whatsapp: "https://wa.me/9779844659531".to_string(),
            phone: "+977 9844659531".to_string(),
            email: "digitalcraftp@gmail.com".to_string(),
            address: "Sukhedhara, Kathmandu, Nepal".to_string(),
        }
    }
}

fn entry(id: &str, title: &str, category: &str, image: &str, description: &str) -> PortfolioItem {
    PortfolioItem {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        kind: MediaKind::Image,
        video_url: None,
    }
}

/// Static portfolio catalog.
pub fn default_portfolio() -> Vec<PortfolioItem> {
    vec![
        entry(
            "1",
            "Dashain Festival Campaign",
            "Video Production",
            "https://images.unsplash.com/photo-1513151233558-d860c5398176?q=80&w=800&auto=format&fit=crop",
            "A heartwarming video campaign that reached 500k+ views across platforms.",
        ),
        entry(
            "2",
            "TechHub Nepal Website",
            "Web Development",
            "https://images.unsplash.com/photo-1498050108023-c5249f4df085?q=80&w=800&auto=format&fit=crop",
            "Modern e-commerce platform with seamless payment integration.",
        ),
        entry(
            "3",
            "Organic Tea Branding",
            "Branding",
            "https://images.unsplash.com/photo-1597318181409-cf64d0b5d8a2?q=80&w=800&auto=format&fit=crop",
            "Complete visual identity and packaging design for a local tea brand.",
        ),
        entry(
            "4",
            "Fashion Week Reels",
            "Social Media",
            "https://images.unsplash.com/photo-1469334031218-e382a71b716b?q=80&w=800&auto=format&fit=crop",
            "High-energy event coverage and reel editing for Nepal Fashion Week.",
        ),
    ]
}
