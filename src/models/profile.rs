use serde::{Deserialize, Serialize};
use serde_json::Value;
use super::loose;

/// Account role; decides which profile rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Author,
    Expert,
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Author => "author",
            Role::Expert => "expert",
            Role::Editor => "editor",
        }
    }

    /// Unknown roles get editor rules, the least demanding set
    pub fn from_str_or_editor(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "author" => Role::Author,
            "expert" => Role::Expert,
            _ => Role::Editor,
        }
    }
}

/// Institution entry on an author profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInstitution {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub postal_code: Option<String>,
}

/// Profile form values, covering every role's fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub institutions: Vec<ProfileInstitution>,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub research_direction: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub institution: String,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub bank_account: Option<String>,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub account_holder: String,
    #[serde(default)]
    pub department: Option<String>,

    // The profile endpoint has used several names for the phone number
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub phone_number: Option<String>,
    #[serde(default, rename = "phoneNumber", deserialize_with = "loose::opt_string")]
    pub phone_number_camel: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "loose::opt_string")]
    pub mobile_phone: Option<String>,
}

impl ProfileInput {
    /// First phone field that is set, or empty
    pub fn resolved_phone(&self) -> &str {
        [
            &self.phone,
            &self.phone_number,
            &self.phone_number_camel,
            &self.mobile,
            &self.mobile_phone,
        ]
        .into_iter()
        .find_map(|field| field.as_deref())
        .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_fallback() {
        assert_eq!(Role::from_str_or_editor("author"), Role::Author);
        assert_eq!(Role::from_str_or_editor("Expert"), Role::Expert);
        assert_eq!(Role::from_str_or_editor("admin"), Role::Editor);
        assert_eq!(Role::Author.as_str(), "author");
    }

    #[test]
    fn test_resolved_phone_order() {
        let profile: ProfileInput = serde_json::from_value(json!({
            "phoneNumber": "13800000000",
            "mobile": "13900000000",
        }))
        .unwrap();
        assert_eq!(profile.resolved_phone(), "13800000000");

        let profile: ProfileInput = serde_json::from_value(json!({
            "mobile_phone": 13700000000u64,
        }))
        .unwrap();
        assert_eq!(profile.resolved_phone(), "13700000000");

        assert_eq!(ProfileInput::default().resolved_phone(), "");
    }
}
