use deck::{render_document, Config, Parser, Source};

fn parse(source: Source, raw: &str) -> Vec<deck::SlideRecord> {
    let config = Config {
        source,
        data: Some(raw.to_string()),
        ..Config::default()
    };
    Parser::new(&config).load_and_parse().unwrap()
}

#[test]
fn markdown_deck_renders_to_a_standalone_document() {
    let slides = parse(
        Source::Markdown,
        "# Welcome\n\nHello\n---\n<!-- layout: quote -->\nHello world\n\u{2014} Ada",
    );
    assert_eq!(slides.len(), 2);

    let html = render_document("Demo", &slides).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<title>Demo</title>"));
    assert!(html.contains("<h1>Welcome</h1>"));
    assert!(html.contains("data-layout=\"quote\""));
    assert!(html.contains("<blockquote>Hello world</blockquote>"));
    assert!(html.contains("Ada"));
}

#[test]
fn json_deck_escapes_user_text_end_to_end() {
    let slides = parse(
        Source::Json,
        r#"{"slides": [{"content": "tags like <em> & \"quotes\""}]}"#,
    );
    let html = render_document("Escapes", &slides).unwrap();
    assert!(html.contains("&lt;em&gt;"));
    assert!(html.contains("&amp;"));
    assert!(!html.contains("tags like <em>"));
}

#[test]
fn html_deck_round_trips_column_markup() {
    let raw = r#"<div>
      <section data-deck-page="" data-deck-layout="two-cols">
        <div data-deck-column=""><p>Facts</p></div>
        <div data-deck-column=""><p>Figures</p></div>
      </section>
    </div>"#;
    let slides = parse(Source::Html, raw);
    let html = render_document("Columns", &slides).unwrap();
    assert!(html.contains("deck-col-left"));
    assert!(html.contains("<p>Facts</p>"));
    assert!(html.contains("deck-col-right"));
    assert!(html.contains("<p>Figures</p>"));
}

#[test]
fn unknown_layout_surfaces_at_render_time_not_parse_time() {
    let slides = parse(
        Source::Markdown,
        "<!-- layout: diagonal -->\nStill parses fine",
    );
    assert_eq!(slides[0].layout, "diagonal");

    let err = render_document("Broken", &slides).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn backgrounds_flow_from_directives_into_the_document() {
    let slides = parse(
        Source::Markdown,
        "<!-- layout: cover -->\n<!-- background: \"https://example.com/bg.png\" -->\n# Title",
    );
    assert_eq!(
        slides[0].background.as_deref(),
        Some("https://example.com/bg.png")
    );

    let html = render_document("Backgrounds", &slides).unwrap();
    assert!(html.contains("background-image: url(https://example.com/bg.png)"));
}
