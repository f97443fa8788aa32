//! Response assembly
//!
//! Pure projection from raw catalog records to the public response
//! shape. URL resolution goes through the storage port and is assumed
//! non-failing at this stage.

use uuid::Uuid;

use crate::domain::entities::{AskAnswer, ResourceRecord, ResourceWithLink};
use crate::domain::repositories::PublicUrlResolver;

/// Build the final answer payload for a successful pipeline run.
///
/// Each record's storage path is swapped for a resolved public URL;
/// every other field is copied verbatim. The answer text is a fixed
/// template embedding the trimmed query.
pub fn assemble(
    query: &str,
    request_id: Uuid,
    resources: Vec<ResourceRecord>,
    urls: &dyn PublicUrlResolver,
) -> AskAnswer {
    let resources: Vec<ResourceWithLink> = resources
        .into_iter()
        .map(|record| ResourceWithLink {
            url: urls.public_url(&record.storage_path),
            id: record.id,
            title: record.title,
            description: record.description,
            kind: record.kind,
        })
        .collect();

    let answer = if resources.is_empty() {
        format!(
            "I couldn't find any resources matching \"{}\" yet. Try rephrasing your question.",
            query
        )
    } else {
        format!(
            "Here's what I found for \"{}\". The {} most relevant resources are linked below.",
            query,
            resources.len()
        )
    };

    AskAnswer {
        request_id,
        answer,
        resources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResourceKind;

    struct PrefixResolver;

    impl PublicUrlResolver for PrefixResolver {
        fn public_url(&self, storage_path: &str) -> String {
            format!("https://cdn.example.com/public/{}", storage_path)
        }
    }

    fn record(id: &str, path: &str) -> ResourceRecord {
        ResourceRecord {
            id: id.to_string(),
            title: format!("Title {}", id),
            description: format!("Description {}", id),
            kind: ResourceKind::SlideDeck,
            storage_path: path.to_string(),
        }
    }

    #[test]
    fn projects_storage_paths_to_public_urls() {
        let request_id = Uuid::new_v4();
        let answer = assemble(
            "RAG basics",
            request_id,
            vec![record("r1", "decks/rag-intro.pdf")],
            &PrefixResolver,
        );

        assert_eq!(answer.request_id, request_id);
        assert_eq!(answer.resources.len(), 1);
        assert_eq!(
            answer.resources[0].url,
            "https://cdn.example.com/public/decks/rag-intro.pdf"
        );
    }

    #[test]
    fn copies_record_fields_verbatim() {
        let answer = assemble(
            "RAG basics",
            Uuid::new_v4(),
            vec![record("r7", "v/clip.mp4")],
            &PrefixResolver,
        );

        let projected = &answer.resources[0];
        assert_eq!(projected.id, "r7");
        assert_eq!(projected.title, "Title r7");
        assert_eq!(projected.description, "Description r7");
        assert_eq!(projected.kind, ResourceKind::SlideDeck);
    }

    #[test]
    fn answer_embeds_query_verbatim() {
        let answer = assemble(
            "RAG basics",
            Uuid::new_v4(),
            vec![record("r1", "a"), record("r2", "b")],
            &PrefixResolver,
        );
        assert!(answer.answer.contains("RAG basics"));
    }

    #[test]
    fn empty_catalog_result_still_answers() {
        let answer = assemble("obscure topic", Uuid::new_v4(), vec![], &PrefixResolver);
        assert!(answer.resources.is_empty());
        assert!(answer.answer.contains("obscure topic"));
    }
}
