//! Store key layout:
//!
//! | key                | value                                 |
//! |--------------------|---------------------------------------|
//! | `<alias>`          | long URL                              |
//! | `usr:<name>`       | bcrypt password hash                  |
//! | `usr:<name>:links` | aliases owned by the user, newest first |
//! | `<alias>:dates`    | click day stamps, newest first        |

pub fn user_key(username: &str) -> String {
    format!("usr:{username}")
}

pub fn user_links_key(username: &str) -> String {
    format!("usr:{username}:links")
}

pub fn dates_key(alias: &str) -> String {
    format!("{alias}:dates")
}
