//! Project discussion threads.

pub mod model;

use model::Discussion;

/// Top-level threads for a project, newest first.
pub fn threads_for_project<'a>(discussions: &'a [Discussion], project_id: &str) -> Vec<&'a Discussion> {
    let mut threads: Vec<&Discussion> = discussions
        .iter()
        .filter(|d| d.project_id == project_id)
        .collect();
    threads.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    threads
}

/// Find a message (thread or reply) by ID.
pub fn find<'a>(discussions: &'a [Discussion], id: &str) -> Option<&'a Discussion> {
    discussions.iter().find_map(|d| d.find(id))
}

pub fn find_mut<'a>(discussions: &'a mut [Discussion], id: &str) -> Option<&'a mut Discussion> {
    discussions.iter_mut().find_map(|d| d.find_mut(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_threads_and_nested_lookup() {
        let mut ws = seed::workspace();
        let threads = threads_for_project(&ws.discussions, "1");
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].message_count(), 2);

        let reply = find_mut(&mut ws.discussions, "2-1").unwrap();
        assert_eq!(reply.user_id, "3");
        assert!(find_mut(&mut ws.discussions, "missing").is_none());
        assert_eq!(find(&ws.discussions, "1-1").unwrap().project_id, "1");
    }
}
