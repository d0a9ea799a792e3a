//! Small helpers shared by the commands

/// Mask credentials of a database URL for display
pub fn mask_database_url(database_url: &str) -> String {
    match database_url.split_once("://") {
        Some((protocol, rest)) => match rest.rfind('@') {
            Some(at_pos) => format!("{}://***{}", protocol, &rest[at_pos..]),
            None => format!("{}://{}", protocol, rest),
        },
        None => "***".to_string(),
    }
}
