//! Known script-injection vectors
//!
//! Each vector must come out without executable markup. Attribute values
//! are the exception: with the default settings a whitelisted `href` keeps
//! whatever URL it carries.

use scrub_html::parse_fragment;
use scrub_sanitize::{clean, render, Pipeline, SanitizeConfig, Whitelist};

const FORBIDDEN: &[&str] = &[
    "<script", "<iframe", "<svg", "<math", "<object", "<embed", "<style", "<form", "onerror",
    "onload", "onclick", "onmouseover", "style=", "<!--",
];

/// Elements or event-handler attributes a browser would build from `html`
fn live_markup(html: &str) -> Vec<String> {
    let whitelist = Whitelist::default();
    let tree = parse_fragment(html);
    let mut found = Vec::new();
    for id in tree.descendants(tree.root()) {
        let Some(elem) = tree.get(id).and_then(|n| n.as_element()) else {
            continue;
        };
        if !whitelist.allows_tag(&elem.local_name) {
            found.push(elem.local_name.clone());
        }
        for attr in &elem.attrs {
            if attr.name.starts_with("on") || attr.name == "style" {
                found.push(format!("{} {}={}", elem.local_name, attr.name, attr.value));
            }
        }
    }
    found
}

fn assert_no_needles(input: &str, out: &str) {
    let lower = out.to_ascii_lowercase();
    for needle in FORBIDDEN {
        assert!(!lower.contains(needle), "{input:?} produced {out:?} containing {needle}");
    }
    assert_eq!(live_markup(out), Vec::<String>::new(), "{input:?} produced {out:?}");
}

/// Checks both the unlinked output and the default linking pipeline
fn assert_inert(input: &str) -> String {
    let out = clean(input);
    assert_no_needles(input, &out);
    assert_no_needles(input, &render(input, "KB-").unwrap());
    out
}

#[test]
fn test_img_onerror() {
    assert_eq!(assert_inert("<img src=x onerror=alert(1)>"), r#"<img src="x">"#);
}

#[test]
fn test_svg_onload() {
    assert_eq!(assert_inert("<svg onload=alert(1)><circle></circle></svg>"), "");
}

#[test]
fn test_iframe_javascript_src() {
    assert_eq!(assert_inert(r#"<iframe src="javascript:alert(1)"></iframe>"#), "");
}

#[test]
fn test_body_onload_is_dropped() {
    assert_eq!(assert_inert("<body onload=alert(1)>hi"), "hi");
}

#[test]
fn test_math_xlink() {
    assert_eq!(
        assert_inert(r#"<math><mi xlink:href="javascript:alert(1)">x</mi></math>"#),
        ""
    );
}

#[test]
fn test_style_attribute() {
    assert_eq!(
        assert_inert(r#"<div style="background:url(javascript:alert(1))">x</div>"#),
        "<div>x</div>"
    );
}

#[test]
fn test_split_script_tag() {
    assert_inert("<scr<script>ipt>alert(1)</script>");
}

#[test]
fn test_noscript_attribute_breakout() {
    assert_inert(r#"<noscript><p title="</noscript><img src=x onerror=alert(1)>">"#);
}

#[test]
fn test_comment_wrapped_payloads() {
    assert_eq!(assert_inert("<!--><script>alert(1)</script>-->"), "");
    assert_eq!(
        assert_inert("<!--[if gte IE 4]><script>alert(1)</script><![endif]-->ok"),
        "ok"
    );
}

#[test]
fn test_unterminated_comment() {
    assert_eq!(assert_inert("ok<!-- <script>alert(1)</script>"), "ok");
}

#[test]
fn test_form_and_inputs() {
    assert_eq!(
        assert_inert(r#"<form action="/steal"><input name="pw"><button>go</button></form>after"#),
        "after"
    );
}

#[test]
fn test_entity_encoded_markup_stays_text() {
    assert_eq!(
        assert_inert("&lt;script&gt;alert(1)&lt;/script&gt;"),
        "&lt;script&gt;alert(1)&lt;/script&gt;"
    );
}

#[test]
fn test_href_values_are_not_validated_by_default() {
    assert_eq!(
        clean(r#"<a href="javas&#99;ript:alert(1)">x</a>"#),
        r#"<a href="javascript:alert(1)">x</a>"#
    );
}

#[test]
fn test_url_schemes_close_the_href_gap() {
    let config = SanitizeConfig::from_json_str(r#"{"url_schemes": ["http", "https", "mailto"]}"#)
        .unwrap();
    let pipeline = Pipeline::new(&config).unwrap();

    assert_eq!(
        pipeline.render(r#"<a href="javas&#99;ript:alert(1)">x</a>"#),
        "<a>x</a>"
    );
    assert_eq!(
        pipeline.render("<a href=\"java\tscript:alert(1)\">x</a>"),
        "<a>x</a>"
    );
    assert_eq!(
        pipeline.render(r#"<a href="mailto:dev@example.com">mail</a>"#),
        r#"<a href="mailto:dev@example.com">mail</a>"#
    );
    assert_eq!(
        pipeline.render(r#"<img src="data:image/svg+xml;base64,PHN2Zz4=">"#),
        "<img>"
    );
}

#[test]
fn test_reference_inside_attribute_cannot_open_tags() {
    let out = render(r#"<img src="KB-1><img src=x onerror=alert(1)>">"#, "KB-").unwrap();
    assert_eq!(
        out,
        r#"<img src="<a href="/issue/1">KB-1</a>&gt;&lt;img src=x onerror=alert(1)&gt;">"#
    );
    assert_eq!(live_markup(&out), Vec::<String>::new());
}

#[test]
fn test_linked_attribute_payloads() {
    assert_inert(r#"<a href="KB-7"><script>alert(1)</script>">x</a>"#);
    assert_inert(r#"<img src="/KB-2.png" data-nodeid="KB-3><iframe src=javascript:alert(1)>">"#);
    assert_inert(r#"<p data-nodeid='KB-9"><iframe src=javascript:alert(1)>'>KB-9</p>"#);
}
