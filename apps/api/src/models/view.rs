//! Presentation data contract: a `Profile` grouped the way the UI displays it.

use serde::Serialize;

use crate::models::profile::Profile;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub identity: IdentityView,
    pub score: ScoreView,
    pub skills: SkillsView,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub optimization_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentityView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub ats_score: u8,
    /// e.g. "82%"
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillsView {
    pub items: Vec<String>,
    /// Comma-joined, as shown in the skills tab.
    pub joined: String,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        ProfileView {
            identity: IdentityView {
                name: profile.name.clone(),
                email: profile.email.clone(),
                phone: profile.phone.clone(),
                summary: profile.summary.clone(),
            },
            score: ScoreView {
                ats_score: profile.ats_score.value(),
                display: profile.ats_score.display(),
            },
            skills: SkillsView {
                items: profile.skills.clone(),
                joined: profile.skills.join(", "),
            },
            experience: profile.experience.clone(),
            education: profile.education.clone(),
            optimization_notes: profile.optimization_points.clone(),
        }
    }
}
