//! Per-category rule table

use crate::model::Category;

/// Constraints a template category imposes on top of the common rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRules {
    pub category: Category,
    /// Whether an enabled header is permitted
    pub allows_header: bool,
    /// Whether the body must reference `{{1}}` (the one-time code)
    pub requires_code_variable: bool,
}

pub const CATEGORY_RULES: &[CategoryRules] = &[
    CategoryRules {
        category: Category::Marketing,
        allows_header: true,
        requires_code_variable: false,
    },
    CategoryRules {
        category: Category::Utility,
        allows_header: true,
        requires_code_variable: false,
    },
    CategoryRules {
        category: Category::Authentication,
        allows_header: false,
        requires_code_variable: true,
    },
];

/// Rules for `category`
pub fn rules_for(category: Category) -> &'static CategoryRules {
    CATEGORY_RULES
        .iter()
        .find(|r| r.category == category)
        .unwrap_or(&CATEGORY_RULES[0])
}
