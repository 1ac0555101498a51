//! Fixed site content: static articles, resource groups and the section map.

pub struct Article {
    pub key: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub struct Resource {
    pub title: &'static str,
    pub desc: &'static str,
    pub link: &'static str,
}

pub const ARTICLES: &[Article] = &[
    Article {
        key: "Charter",
        title: "Community Charter",
        body: "<h1>Core Values</h1><p>We believe that AI is a tool for human expression, not a replacement for human spirit.</p><h2>Transparency</h2><p>We share workflows, prompts, and seeds openly. Gatekeeping is discouraged.</p><h2>Respect</h2><p>We critique the output, not the creator. Harassment is not tolerated.</p>",
    },
    Article {
        key: "Rules",
        title: "Code of Conduct",
        body: "<h1>Official Rules</h1><ol><li>No Hate Speech</li><li>Credit Artists</li><li>Label NSFW content appropriately</li></ol>",
    },
    Article {
        key: "FAQ",
        title: "Frequently Asked Questions",
        body: "<h1>FAQ</h1><p><strong>Q: How do I join?</strong><br>A: Just start creating and sharing.</p>",
    },
    Article {
        key: "Contact",
        title: "Contact Admin",
        body: "<h1>Reach Out</h1><p>Email: admin@latentspace.club</p>",
    },
    Article {
        key: "Midjourney Docs",
        title: "Midjourney Documentation",
        body: "<h1>MJ Docs</h1><p>Comprehensive guide to parameter tuning.</p>",
    },
    Article {
        key: "Stable Diffusion",
        title: "Stable Diffusion Guide",
        body: "<h1>SD Local Install</h1><p>How to run A1111 locally.</p>",
    },
    Article {
        key: "Forums",
        title: "Forums",
        body: "<h1>Discussion Board</h1><p>This is where the forum threads would live.</p>",
    },
    Article {
        key: "Events",
        title: "Events Calendar",
        body: "<h1>Upcoming Events</h1><p>Hackathon 2026 dates TBD.</p>",
    },
    Article {
        key: "Arts",
        title: "Art Gallery",
        body: "<h1>Member Showcase</h1><p>Gallery view goes here.</p>",
    },
    Article {
        key: "Dark Arts",
        title: "Dark Arts",
        body: "<h1>Restricted Section</h1><p>Experimental content. Proceed with caution.</p>",
    },
    Article {
        key: "Club",
        title: "The Club",
        body: "<h1>Welcome Home</h1><p>The central hub for all members.</p>",
    },
];

pub const RESOURCE_GROUPS: &[(&str, &[Resource])] = &[
    (
        "Generative Art",
        &[
            Resource { title: "Midjourney Docs", desc: "Parameter guide", link: "#" },
            Resource { title: "Stable Diffusion", desc: "Local generation", link: "#" },
            Resource { title: "PromptHero", desc: "Inspiration", link: "#" },
        ],
    ),
    (
        "Models & Training",
        &[
            Resource { title: "Hugging Face", desc: "Model hub", link: "#" },
            Resource { title: "Civitai", desc: "Fine-tuning", link: "#" },
        ],
    ),
    ("Tools", &[Resource { title: "ControlNet", desc: "Composition", link: "#" }]),
];

/// How a navigation section gathers its entries.
pub enum Section {
    Single(&'static str),
    List(&'static [&'static str]),
    Grouped,
}

pub const SECTIONS: &[(&str, Section)] = &[
    ("Club", Section::Single("Club")),
    ("Information", Section::List(&["Charter", "Rules", "FAQ", "Contact"])),
    ("Resources", Section::Grouped),
    ("Forums", Section::Single("Forums")),
    ("Events", Section::Single("Events")),
    ("Arts", Section::Single("Arts")),
    ("Dark Arts", Section::Single("Dark Arts")),
];

pub fn article(key: &str) -> Option<&'static Article> {
    ARTICLES.iter().find(|a| a.key == key)
}

pub fn resource(title: &str) -> Option<(&'static str, &'static Resource)> {
    RESOURCE_GROUPS
        .iter()
        .find_map(|(group, items)| items.iter().find(|r| r.title == title).map(|r| (*group, r)))
}

pub fn section(name: &str) -> Option<&'static Section> {
    SECTIONS.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
}

/// Every key that receives an interaction record at startup, catalog order.
pub fn static_keys() -> impl Iterator<Item = &'static str> {
    ARTICLES
        .iter()
        .map(|a| a.key)
        .chain(RESOURCE_GROUPS.iter().flat_map(|(_, items)| items.iter().map(|r| r.title)))
}
