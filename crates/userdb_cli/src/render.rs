//! Text rendering of query results.

use comfy_table::presets::NOTHING;
use comfy_table::Table;
use userdb_core::UserRecord;

pub const NO_RESULTS: &str = "No results found.";

/// Renders users as a `NAME / EMAIL / AGE` table, or [`NO_RESULTS`].
pub fn render_users(users: &[UserRecord]) -> String {
    if users.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut table = Table::new();
    table.load_preset(NOTHING).set_header(vec!["NAME", "EMAIL", "AGE"]);
    for user in users {
        table.add_row(vec![
            user.name.clone(),
            user.email.clone(),
            user.age.to_string(),
        ]);
    }
    table.to_string()
}
