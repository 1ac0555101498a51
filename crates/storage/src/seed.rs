use crate::{catalog, models::CommentNode, models::InteractionRecord, Store, StoreConfig};
use domain::{ids, UserPost};
use rand::Rng;
use tracing::info;

const HOUR: i64 = 3_600_000;
const WEEK: i64 = 7 * 24 * HOUR;

const LOREM_SHORT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";
const LOREM_LONG: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

const MOCK_PY: &str = "data:text/x-python;base64,cHJpbnQoIkhlbGxvIExhdGVudCBTcGFjZSEiKQoKZGVmIGdlbmVyYXRlX2FydChzZWVkKToKICAgIHJldHVybiBmIkFydCBmb3Ige3NlZWR9Ig==";
const MOCK_PDF: &str = "data:application/pdf;base64,JVBERi0xLjcKCjEgMCBvYmogICUgZW50cnkgcG9pbnQKPDwKICAvVHlwZSAvQ2F0YWxvZwogIC9QYWdlcyAyIDAgUgo+PgplbmRvYmoKCjIgMCBvYmoKPDwKICAvVHlwZSAvUGFnZXwKICAvTWVkaWFCb3ggWyAwIDAgMjAwIDIwMCBdCiAgL0NvdW50IDEKICAvS2lkcyBbIDMgMCBSIF0KPj4KZW5kb2JqCgozIDAgb2JqCjw8CiAgL1R5cGUgL1BhZ2UKICAvUGFyZW50IDIgMCBSCiAgL1Jlc291cmNlcyA8PAogICAgL0ZvbnQgPDwKICAgICAgL0YxIDQgMCBSCj4+CiAgL0NvbnRlbnRzIDUgMCBSCj4+CmVuZG9iagoKNCAwIG9iago8PAogIC9UeXBlIC9Gb250CiAgL1N1YnR5cGUgL1R5cGUxCiAgL0Jhc2VGb250IDU=";

struct MockPost {
    id: &'static str,
    title: &'static str,
    body: String,
    category: &'static str,
    author: &'static str,
    age: i64,
    image: Option<&'static str>,
}

fn mock_posts() -> Vec<MockPost> {
    vec![
        MockPost {
            id: "post-mock-1",
            title: "Future of Latent Interfaces",
            body: LOREM_LONG.to_string(),
            category: "Club",
            author: "neural_net_ninja",
            age: 2 * HOUR,
            image: None,
        },
        MockPost {
            id: "post-mock-2",
            title: "Latest Gen (V6.0)",
            body: format!("Check out this landscape. {}", LOREM_SHORT),
            category: "Arts",
            author: "guest_user",
            age: 5 * HOUR,
            image: Some("https://picsum.photos/seed/latent1/800/600"),
        },
        MockPost {
            id: "post-mock-3",
            title: "Prompt Engineering is Evolving",
            body: format!("> {}\n\nLayered shifting is the new meta.", LOREM_SHORT),
            category: "Forums",
            author: "latent_explorer",
            age: 24 * HOUR,
            image: None,
        },
        MockPost {
            id: "post-mock-4",
            title: "LoRA Training Tips",
            body: format!("Avoid NaN loss by tuning your learning rate. {}", LOREM_SHORT),
            category: "Forums",
            author: "gpu_hoarder",
            age: 48 * HOUR,
            image: None,
        },
        MockPost {
            id: "post-mock-5",
            title: "Hackathon 2025 Teams",
            body: format!("Forming groups for the spring jam! {}", LOREM_SHORT),
            category: "Events",
            author: "mod",
            age: 72 * HOUR,
            image: None,
        },
    ]
}

fn node(
    id: &str,
    key: &str,
    parent: Option<&str>,
    author: &str,
    text: &str,
    timestamp: i64,
    image: Option<&str>,
) -> CommentNode {
    CommentNode {
        id: id.to_string(),
        key: key.to_string(),
        parent: parent.map(str::to_string),
        author: author.to_string(),
        text: text.to_string(),
        timestamp,
        image: image.map(str::to_string),
        tags: Vec::new(),
        replies: Vec::new(),
        edit_history: Vec::new(),
    }
}

pub(crate) fn populate(store: &mut Store, config: &StoreConfig) {
    let now = ids::now_millis();
    let posts = mock_posts();

    store.posts = posts
        .iter()
        .map(|m| UserPost {
            id: m.id.to_string(),
            title: m.title.to_string(),
            body: m.body.clone(),
            category: m.category.to_string(),
            author: m.author.to_string(),
            timestamp: now - m.age,
            image: m.image.map(str::to_string),
            tags: Vec::new(),
            edit_history: Vec::new(),
        })
        .collect();

    let keys: Vec<&str> = catalog::static_keys().chain(posts.iter().map(|m| m.id)).collect();
    let span = config.vote_span.max(1);

    for key in keys {
        // 资源标题可能与文章重名，只初始化一次
        if store.interactions.contains_key(key) {
            continue;
        }
        let mut record = InteractionRecord::new(now - store.rng.gen_range(0..WEEK));
        record.votes = config.vote_floor + store.rng.gen_range(0..span);
        store.interactions.insert(key.to_string(), record);

        match key {
            "post-mock-1" => {
                store.insert_node(node(
                    "c-mock-1",
                    key,
                    None,
                    "latent_explorer",
                    "Fascinating. Check this related paper.",
                    now - 1_000_000,
                    Some(MOCK_PDF),
                ));
                store.insert_node(node(
                    "c-mock-1-r1",
                    key,
                    Some("c-mock-1"),
                    "neural_net_ninja",
                    "I wrote a script for that.",
                    now - 500_000,
                    Some(MOCK_PY),
                ));
            }
            "post-mock-4" => {
                store.insert_node(node(
                    "c-mock-2",
                    key,
                    None,
                    "neural_net_ninja",
                    "Lower LR by 10x.",
                    now - 2_000_000,
                    None,
                ));
            }
            _ => {
                if store.rng.gen::<f64>() > config.comment_threshold {
                    let ts = now - 1_000_000;
                    let id = store.mint_comment_id(ts);
                    let author = store.local_user.clone();
                    store.insert_node(node(&id, key, None, &author, "Interesting take.", ts, None));
                }
            }
        }
    }

    info!(
        keys = store.interactions.len(),
        posts = store.posts.len(),
        comments = store.nodes.len(),
        "store seeded"
    );
}
