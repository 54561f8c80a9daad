use gtag_inject::inject::inject_into_html;
use gtag_inject::{ScriptDirective, TrackingId, gtag_directives};

fn directives() -> Vec<ScriptDirective> {
    gtag_directives(&TrackingId::parse("G-ABC123").unwrap()).unwrap()
}

#[test]
fn tags_land_before_closing_head_in_order() {
    let html = std::fs::read_to_string("fixtures/page.html").unwrap();
    let out = inject_into_html(&html, &directives());

    let head_end = out.find("</head>").unwrap();
    let loader = out.find("gtag/js?id=G-ABC123").unwrap();
    let bootstrap = out.find("google-analytics").unwrap();
    assert!(loader < head_end);
    assert!(bootstrap < head_end);
    assert!(loader < bootstrap, "loader tag must precede the bootstrap");
    assert!(out.contains("<main>Hello</main>"));
}

#[test]
fn body_fallback_when_document_has_no_head() {
    let html = "<html><body><p>x</p></body></html>";
    let out = inject_into_html(html, &directives());
    let tag = out.find("gtag/js?id=G-ABC123").unwrap();
    assert!(out.find("<p>x</p>").unwrap() < tag);
    assert!(tag < out.find("</body>").unwrap());
}

#[test]
fn matching_is_case_insensitive() {
    let html = "<HTML><HEAD><TITLE>t</TITLE></HEAD><BODY></BODY></HTML>";
    let out = inject_into_html(html, &directives());
    assert!(out.find("gtag/js?id=G-ABC123").unwrap() < out.find("</HEAD>").unwrap());
}

#[test]
fn fragment_gets_tags_appended() {
    let out = inject_into_html("<p>standalone</p>", &directives());
    assert!(out.starts_with("<p>standalone</p>\n"));
    assert!(out.contains("gtag/js?id=G-ABC123"));
    assert!(out.ends_with("</script>\n"));
}
