//! Walks paginated collections

use std::future::Future;

use tracing::debug;

use crate::envelope::{Collection, Entry};
use crate::error::StrapiError;

/// Query parameters for one page
pub fn page_query(page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("pagination[page]", page.to_string()),
        ("pagination[pageSize]", page_size.to_string()),
    ]
}

/// Fetches pages starting at 1 until `page >= pageCount`
///
/// A response without pagination metadata, or with an empty page, ends the
/// walk.
pub async fn fetch_all<A, F, Fut>(mut fetch_page: F) -> Result<Vec<Entry<A>>, StrapiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Collection<A>, StrapiError>>,
{
    let mut entries = Vec::new();
    let mut page = 1;

    loop {
        let collection = fetch_page(page).await?;
        let received = collection.data.len();
        entries.extend(collection.data);

        let Some(pagination) = collection.meta.pagination else {
            break;
        };
        debug!(page, page_count = pagination.page_count, total = pagination.total, "Fetched page");
        if received == 0 || pagination.page >= pagination.page_count {
            break;
        }
        page = pagination.page + 1;
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{Meta, Pagination};

    fn page(page: u32, page_count: u32, ids: &[u64]) -> Collection<()> {
        Collection {
            data: ids.iter().map(|id| Entry { id: *id, attributes: () }).collect(),
            meta: Meta {
                pagination: Some(Pagination { page, page_size: 2, page_count, total: 5 }),
            },
        }
    }

    #[tokio::test]
    async fn test_walks_every_page() {
        let mut requested = Vec::new();
        let entries = fetch_all(|p| {
            requested.push(p);
            let result = match p {
                1 => page(1, 3, &[1, 2]),
                2 => page(2, 3, &[3, 4]),
                _ => page(3, 3, &[5]),
            };
            async move { Ok(result) }
        })
        .await
        .unwrap();

        assert_eq!(requested, vec![1, 2, 3]);
        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_empty_collection_stops() {
        let entries = fetch_all(|_| async { Ok(page(1, 0, &[])) }).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_missing_metadata_stops() {
        let entries = fetch_all(|_| async {
            Ok(Collection { data: vec![Entry { id: 9, attributes: () }], meta: Meta::default() })
        })
        .await
        .unwrap();
        assert_eq!(entries.len(), 1);
    }
}
