use crate::parser::markdown::{render_page_markdown, render_stored_markdown, split_front_matter};
use crate::parser::model::PageFrontMatter;

// front matter carries a page's identity: slug, title, template and routing flags
#[test]
fn test_split_front_matter_valid() {
    let input = "---\nslug: about\ntitle: About Us\ntemplate: contained\nis_top_level_path: true\n---\n# Hello World";
    let (fm, body) =
        split_front_matter::<PageFrontMatter>(input, "about.md").expect("Should parse valid frontmatter");

    assert_eq!(fm.slug.as_deref(), Some("about"));
    assert_eq!(fm.title.as_deref(), Some("About Us"));
    assert_eq!(fm.template.as_deref(), Some("contained"));
    assert_eq!(fm.is_top_level_path, Some(true));
    assert!(fm.landing_page.is_none());
    assert_eq!(body.trim(), "# Hello World");
}

// a seed without front matter is just a markdown body
#[test]
fn test_split_front_matter_absent() {
    let input = "# Just Content";
    let (fm, body) = split_front_matter::<PageFrontMatter>(input, "test.md")
        .expect("Should handle missing frontmatter");

    assert!(fm.slug.is_none());
    assert!(fm.title.is_none());
    assert_eq!(body.trim(), "# Just Content");
}

#[test]
fn test_render_stored_markdown() {
    let input = "# Title\nThis is a [link](test.md)";

    let result =
        render_stored_markdown(input).expect("Should compile markdown");

    assert!(result.contains("<h1>Title</h1>"));
    assert!(result.contains(r#"<a href="test.md">link</a>"#));
}

// seeds link to each other by filename; the resolver swaps in the public path
#[test]
fn test_render_rewrites_seed_links() {
    let markdown_with_link = "Read the [guidelines](community-guidelines.md)";

    let result = render_page_markdown(markdown_with_link, |link| {
        if link.ends_with(".md") {
            format!("/{}", link.trim_end_matches(".md"))
        } else {
            link.to_string()
        }
    })
    .expect("Should compile");

    assert!(result.contains(r#"<a href="/community-guidelines">guidelines</a>"#));
}

// tables, strikethrough and task lists are enabled
#[test]
fn test_render_page_extensions() {
    let input = "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done";
    let result = render_stored_markdown(input).unwrap();

    assert!(result.contains("<table>"));
    assert!(result.contains("<del>gone</del>"));
    assert!(result.contains(r#"type="checkbox""#));
}

// only anchors are rewritten, image sources keep their path
#[test]
fn test_render_leaves_images_alone() {
    let input = "![logo](logo.md) and [home](home.md)";
    let result = render_page_markdown(input, |link| format!("/{}", link.trim_end_matches(".md"))).unwrap();

    assert!(result.contains(r#"src="logo.md""#));
    assert!(result.contains(r#"href="/home""#));
}

#[test]
fn test_parsing_malformed_frontmatter() {
    // Case 1: Unclosed Frontmatter
    let unclosed_frontmatter_md = "---\nunfinished frontmatter";
    let (fm, body) = split_front_matter::<PageFrontMatter>(unclosed_frontmatter_md, "test.md").unwrap();
    assert!(fm.slug.is_none());
    assert_eq!(body, unclosed_frontmatter_md);

    // Case 2: Gibberish Frontmatter
    let expected_body = "Hello world!";
    let gibberish_frontmatter_md = format!("---\n::br()k=n y@ml: :;;\n---\n{}", &expected_body);
    let (fm, body) = split_front_matter::<PageFrontMatter>(&gibberish_frontmatter_md, "test.md").unwrap();
    assert!(fm.slug.is_none());
    assert_eq!(body.trim(), expected_body);

    // Case 3: Empty Frontmatter
    let empty_frontmatter_md = format!("---\n---\n{}", &expected_body);
    let (fm, body) = split_front_matter::<PageFrontMatter>(&empty_frontmatter_md, "test.md").unwrap();
    assert!(fm.title.is_none());
    assert_eq!(body.trim(), expected_body);
}
