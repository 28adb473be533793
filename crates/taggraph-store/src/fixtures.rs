//! Built-in sample contacts, used when device contacts are unavailable or
//! no contacts file was supplied. Tags overlap on purpose so the sample
//! graph has shared hashtag hubs to explore.

use taggraph_core::Contact;

fn contact(id: &str, name: &str, phone: &str, tags: &[&str], summary: Option<&str>) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        phone_number: phone.to_string(),
        hashtags: tags.iter().map(|t| t.to_string()).collect(),
        summary: summary.map(str::to_string),
        ..Contact::default()
    }
}

pub fn sample_contacts() -> Vec<Contact> {
    vec![
        contact(
            "1",
            "Maya Chen",
            "+1 (555) 010-0001",
            &["design", "sf", "coffee", "climbing", "startup"],
            Some("Product designer, met at the Dolores Park picnic"),
        ),
        contact(
            "2",
            "Luis Ortega",
            "+1 (555) 010-0002",
            &["climbing", "coffee", "photography"],
            Some("Belay partner on Tuesdays"),
        ),
        contact(
            "3",
            "Priya Patel",
            "+1 (555) 010-0003",
            &["startup", "sf", "investing", "running"],
            Some("Angel investor, intro from Maya"),
        ),
        contact(
            "4",
            "Sam Whitfield",
            "+1 (555) 010-0004",
            &["college", "music", "nyc"],
            Some("Old roommate, plays bass"),
        ),
        contact(
            "5",
            "Nadia Karimi",
            "+1 (555) 010-0005",
            &["running", "nyc", "books"],
            None,
        ),
        contact(
            "6",
            "Tom Becker",
            "+1 (555) 010-0006",
            &["college", "sports", "coffee"],
            Some("Fantasy league commissioner"),
        ),
        contact("7", "Ana Sousa", "+1 (555) 010-0007", &[], None),
    ]
}
