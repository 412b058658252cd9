//! Markdown Content
//!
//! Renders the marketing pages from markdown bundled into the binary.
//! Extends pulldown-cmark with:
//! - Raw HTML shown as text, never injected
//! - External links opened in a new tab
//! - `tel:` and `mailto:` links left as they are

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};
use pulldown_cmark_escape::{escape_href, escape_html};

/// Parse markdown into HTML for `inner_html`
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

// State for the event transformer
enum State {
    Normal,
    InExternalLink,
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match event {
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

            Event::Start(Tag::Link { dest_url, title, .. }) if is_external(&dest_url) => {
                let mut html = String::from(r#"<a href=""#);
                let _ = escape_href(&mut html, &dest_url);
                html.push_str(r#"" target="_blank" rel="noopener noreferrer""#);
                if !title.is_empty() {
                    html.push_str(r#" title=""#);
                    let _ = escape_html(&mut html, &title);
                    html.push('"');
                }
                html.push('>');
                events.push(Event::InlineHtml(CowStr::from(html)));
                state = State::InExternalLink;
            }

            Event::End(TagEnd::Link) if matches!(state, State::InExternalLink) => {
                events.push(Event::InlineHtml(CowStr::from("</a>")));
                state = State::Normal;
            }

            other => events.push(other),
        }
    }

    events
}

fn is_external(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_tables() {
        let html = parse_markdown("# Services\n\n| Route | Days |\n|---|---|\n| Pune - Surat | 2 |\n");
        assert!(html.contains("<h1>Services</h1>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>Pune - Surat</td>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = parse_markdown("Hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn external_links_open_in_new_tab() {
        let html = parse_markdown("[Maps](https://maps.example.com/?q=a&b \"Find us\")");
        assert!(html.contains(r#"href="https://maps.example.com/?q=a&amp;b""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"title="Find us""#));
        assert!(html.trim_end().ends_with("</a></p>"));
    }

    #[test]
    fn quotes_in_external_links_cannot_break_out_of_attributes() {
        let html = parse_markdown(r#"[Go](<https://a.example/x"y> "say \"hi\" <now>")"#);
        assert!(html.contains(r#"href="https://a.example/x%22y""#));
        assert!(html.contains(r#"title="say &quot;hi&quot; &lt;now&gt;""#));
    }

    #[test]
    fn internal_and_phone_links_stay_plain() {
        let html = parse_markdown("[Track](/track) or [call](tel:+912000000000)");
        assert!(html.contains(r#"<a href="/track">Track</a>"#));
        assert!(html.contains(r#"<a href="tel:+912000000000">call</a>"#));
        assert!(!html.contains("_blank"));
    }
}
