use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identity of the signed-in user as reported by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Structured role record; any of the fields may carry the role name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleRecord {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub role: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
}

/// Role value supplied by the authorization service.
///
/// Roles arrive either as plain strings or as records; anything else is
/// kept as `Other` and never matches a role check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Role {
    PlainName(String),
    Structured(RoleRecord),
    Other(Value),
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only JSON objects are records; arrays must not decode positionally
        Ok(match Value::deserialize(deserializer)? {
            Value::String(name) => Role::PlainName(name),
            Value::Object(map) => match serde_json::from_value(Value::Object(map.clone())) {
                Ok(record) => Role::Structured(record),
                Err(_) => Role::Other(Value::Object(map)),
            },
            other => Role::Other(other),
        })
    }
}

impl Role {
    pub fn plain(name: &str) -> Self {
        Role::PlainName(name.to_string())
    }

    /// The string a role check is matched against.
    ///
    /// For records the first non-empty of `name`, `code`, `role`, `id` wins.
    /// Numeric fields are rendered as their decimal text.
    pub fn normalized_name(&self) -> Option<String> {
        match self {
            Role::PlainName(name) if !name.is_empty() => Some(name.clone()),
            Role::PlainName(_) => None,
            Role::Structured(record) => [&record.name, &record.code, &record.role, &record.id]
                .into_iter()
                .flatten()
                .find_map(|value| match value {
                    Value::String(s) if !s.is_empty() => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                }),
            Role::Other(_) => None,
        }
    }
}

/// Tenant record persisted by the login flow under `mh_tenant`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    #[serde(default)]
    pub tenant: Option<String>,
}

/// What the login collaborator hands over once credentials were accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    pub user: UserInfo,
    #[serde(default)]
    pub roles: Vec<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Role {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_plain_and_structured_roles_decode() {
        assert_eq!(decode(r#""Admin""#), Role::plain("Admin"));
        assert!(matches!(decode(r#"{"code": "editor"}"#), Role::Structured(_)));
        assert!(matches!(decode("42"), Role::Other(_)));
        assert!(matches!(decode("[1, 2]"), Role::Other(_)));
        assert_eq!(decode(r#"["admin"]"#).normalized_name(), None);
    }

    #[test]
    fn test_record_field_priority() {
        let role = decode(r#"{"id": "r-1", "role": "reviewer", "code": "", "name": null}"#);
        assert_eq!(role.normalized_name().as_deref(), Some("reviewer"));

        let role = decode(r#"{"name": "Site Admin", "code": "editor"}"#);
        assert_eq!(role.normalized_name().as_deref(), Some("Site Admin"));

        let role = decode(r#"{"id": 7}"#);
        assert_eq!(role.normalized_name().as_deref(), Some("7"));
    }

    #[test]
    fn test_unmatched_shapes_have_no_name() {
        assert_eq!(decode("{}").normalized_name(), None);
        assert_eq!(decode(r#"{"name": true}"#).normalized_name(), None);
        assert_eq!(decode(r#""""#).normalized_name(), None);
        assert_eq!(decode("null").normalized_name(), None);
    }

    #[test]
    fn test_tenant_record_ignores_extra_fields() {
        let record: TenantRecord =
            serde_json::from_str(r#"{"tenant": "Acme", "region": "eu"}"#).unwrap();
        assert_eq!(record.tenant.as_deref(), Some("Acme"));
    }
}
