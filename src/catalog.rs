// Static catalog of the attention-mechanism study roadmap

use lazy_static::lazy_static;

/// One video to archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: &'static str,
    pub url: &'static str,
}

/// A topic category with its ordered list of videos. The category name
/// doubles as the output subdirectory name.
#[derive(Debug, Clone)]
pub struct CategorySection {
    pub name: &'static str,
    pub videos: Vec<CatalogEntry>,
}

/// A catalog entry paired with its run-wide 1-based download index.
#[derive(Debug, Clone, Copy)]
pub struct IndexedEntry {
    pub index: usize,
    pub category: &'static str,
    pub entry: CatalogEntry,
}

lazy_static! {
    /// The roadmap, in study order. Iteration order (category order, then
    /// per-category list order) defines the download index of every entry.
    pub static ref CATALOG: Vec<CategorySection> = vec![
        CategorySection {
            name: "basic_standard_attention",
            videos: vec![CatalogEntry {
                title: "Attention Is All You Need – Explanation",
                url: "https://www.youtube.com/watch?v=w76Dpp7b3B4",
            }],
        },
        CategorySection {
            name: "self_attention",
            videos: vec![CatalogEntry {
                title: "Attention in Transformers",
                url: "https://www.youtube.com/watch?v=N7WyaOuhBHQ",
            }],
        },
        CategorySection {
            name: "multi_head_attention",
            videos: vec![
                CatalogEntry {
                    title: "Transformer – Understanding Multi-Head Attention",
                    url: "https://www.youtube.com/watch?v=2BRAU7nGTAw",
                },
                CatalogEntry {
                    title: "Multi-Head Latent Attention Coded from Scratch in Python",
                    url: "https://www.youtube.com/watch?v=mIaWmJVrMpc",
                },
            ],
        },
        CategorySection {
            name: "cross_attention",
            videos: vec![CatalogEntry {
                title: "Intro to Attention and Its Forms",
                url: "https://www.youtube.com/watch?v=IR8PqmGTGyw",
            }],
        },
        CategorySection {
            name: "sparse_efficient_attention",
            videos: vec![
                CatalogEntry {
                    title: "Intro to Attention and Its Forms",
                    url: "https://www.youtube.com/watch?v=IR8PqmGTGyw",
                },
                CatalogEntry {
                    title: "Hardware Efficient Attention for Fast Decoding",
                    url: "https://www.youtube.com/watch?v=oHkMoQi8Z7M",
                },
            ],
        },
        CategorySection {
            name: "linear_attention",
            videos: vec![CatalogEntry {
                title: "Intro to Attention and Its Forms",
                url: "https://www.youtube.com/watch?v=IR8PqmGTGyw",
            }],
        },
        CategorySection {
            name: "performer_kernelized_attention",
            videos: vec![CatalogEntry {
                title: "Intro to Attention and Its Forms",
                url: "https://www.youtube.com/watch?v=IR8PqmGTGyw",
            }],
        },
        CategorySection {
            name: "memory_persistent_attention",
            videos: vec![CatalogEntry {
                title: "ATLAS: Learning to Optimally Memorize the Context at Test Time",
                url: "https://www.youtube.com/watch?v=cNfX1aRr9Hg",
            }],
        },
        CategorySection {
            name: "relative_positional_attention",
            videos: vec![CatalogEntry {
                title: "Attention Is All You Need – Explanation",
                url: "https://www.youtube.com/watch?v=w76Dpp7b3B4",
            }],
        },
        CategorySection {
            name: "global_local_hierarchical_attention",
            videos: vec![CatalogEntry {
                title: "Hierarchical Reasoning / Attention Models",
                url: "https://www.youtube.com/@gabrielmongaras/videos",
            }],
        },
        CategorySection {
            name: "attention_with_recurrence_feedback",
            videos: vec![CatalogEntry {
                title: "Learning to (Learn at Test Time): RNNs with Expressive Hidden States",
                url: "https://www.youtube.com/watch?v=I9Ghw2Z7Gqk",
            }],
        },
        CategorySection {
            name: "adaptive_dynamic_attention",
            videos: vec![CatalogEntry {
                title: "From Sparse to Soft Mixtures of Experts Explained",
                url: "https://www.youtube.com/watch?v=-IBJ1CRO9Zw",
            }],
        },
        CategorySection {
            name: "sparsemax_entmax_attention",
            videos: vec![CatalogEntry {
                title: "From Sparse to Soft Mixtures of Experts Explained",
                url: "https://www.youtube.com/watch?v=-IBJ1CRO9Zw",
            }],
        },
        CategorySection {
            name: "mixture_of_experts_attention",
            videos: vec![CatalogEntry {
                title: "From Sparse to Soft Mixtures of Experts Explained",
                url: "https://www.youtube.com/watch?v=-IBJ1CRO9Zw",
            }],
        },
    ];
}

/// Flatten the catalog into download order, assigning 1-based indices.
pub fn indexed_entries() -> Vec<IndexedEntry> {
    let mut entries = Vec::new();
    let mut index = 1;
    for section in CATALOG.iter() {
        for entry in &section.videos {
            entries.push(IndexedEntry {
                index,
                category: section.name,
                entry: *entry,
            });
            index += 1;
        }
    }
    entries
}

/// Human-readable category name for logs ("self_attention" -> "Self Attention").
pub fn display_name(raw: &str) -> String {
    raw.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_sequential_from_one() {
        let entries = indexed_entries();
        for (position, item) in entries.iter().enumerate() {
            assert_eq!(item.index, position + 1);
        }
    }

    #[test]
    fn test_iteration_follows_category_then_list_order() {
        let entries = indexed_entries();
        assert_eq!(entries[0].category, "basic_standard_attention");
        // multi_head_attention holds entries 3 and 4
        assert_eq!(entries[2].category, "multi_head_attention");
        assert_eq!(entries[3].category, "multi_head_attention");
        assert_eq!(
            entries[3].entry.title,
            "Multi-Head Latent Attention Coded from Scratch in Python"
        );
    }

    #[test]
    fn test_every_entry_has_a_url() {
        for item in indexed_entries() {
            assert!(item.entry.url.starts_with("https://"), "bad url: {}", item.entry.url);
            assert!(!item.entry.title.is_empty());
        }
    }

    #[test]
    fn test_indexing_is_idempotent() {
        let first: Vec<usize> = indexed_entries().iter().map(|e| e.index).collect();
        let second: Vec<usize> = indexed_entries().iter().map(|e| e.index).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("self_attention"), "Self Attention");
        assert_eq!(display_name("basic_standard_attention"), "Basic Standard Attention");
    }
}
