//! Profile form handling.

use serde::{Deserialize, Serialize};

use crate::common::parse_list;
use crate::user::model::UserUpdate;

/// Editable profile fields. Skills arrive as one comma-separated string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub skills: Option<String>,
}

impl ProfileUpdate {
    pub fn into_user_update(self) -> UserUpdate {
        UserUpdate {
            name: self.name,
            title: self.title,
            department: self.department,
            phone: self.phone,
            location: self.location,
            about: self.about,
            skills: self.skills.as_deref().map(parse_list),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_skills_are_split_and_trimmed() {
        let update = ProfileUpdate {
            skills: Some(" Rust, SQL ,, Kubernetes".to_string()),
            ..Default::default()
        };
        let user_update = update.into_user_update();
        assert_eq!(
            user_update.skills,
            Some(vec!["Rust".to_string(), "SQL".to_string(), "Kubernetes".to_string()])
        );
        assert!(user_update.banned.is_none());
    }

    #[test]
    fn test_update_profile_applies_to_actor() {
        let mut ws = seed::workspace();
        let update = ProfileUpdate {
            location: Some("Lisbon".to_string()),
            skills: Some("Figma, Research".to_string()),
            ..Default::default()
        };
        let emily = ws.update_profile("3", update).unwrap();
        assert_eq!(emily.location, "Lisbon");
        assert_eq!(emily.skills, vec!["Figma", "Research"]);
        assert_eq!(emily.name, "Emily Davis");

        let blank = ProfileUpdate {
            name: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(ws.update_profile("3", blank).is_err());
    }
}
