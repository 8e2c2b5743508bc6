use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Keyword matched case-insensitively against every column.
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn keyword(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

/// Result of a delete or cancel; zero means the id matched nothing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AffectedRows {
    pub affected: u64,
}

/// Trims a free-text form value, mapping blank input to `None`.
pub fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Some("  P1 ".into())), Some("P1".into()));
        assert_eq!(normalize(Some("   ".into())), None);
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn test_search_keyword_defaults_to_empty() {
        assert_eq!(SearchQuery::default().keyword(), "");
    }
}
