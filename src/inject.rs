use crate::model::{LoadStrategy, ScriptDirective, ScriptSource};

/// Render one directive as an HTML `<script>` tag.
pub fn render_directive(directive: &ScriptDirective) -> String {
    match directive.strategy {
        LoadStrategy::Eager => render_eager(directive),
        LoadStrategy::LazyOnload => render_lazy(directive),
    }
}

fn render_eager(directive: &ScriptDirective) -> String {
    match &directive.source {
        ScriptSource::External { src } => format!(
            "<script src=\"{}\"{}></script>",
            html_escape(src.as_str()),
            attr_string(directive)
        ),
        ScriptSource::Inline { body } => {
            format!("<script{}>\n{}</script>", attr_string(directive), body)
        }
    }
}

/// A lazy directive becomes a small installer that creates the real script
/// element only once the `load` event has fired. A `defer` attribute is not
/// equivalent: deferred scripts still execute before `load`. Inline bodies
/// are re-injected as element text so top-level declarations (the global
/// `gtag` function) keep their global scope.
fn render_lazy(directive: &ScriptDirective) -> String {
    let mut setup = String::new();
    if let Some(id) = &directive.id {
        setup.push_str(&format!("s.id={};", js_string(id)));
    }
    for (name, value) in &directive.attrs {
        setup.push_str(&format!(
            "s.setAttribute({},{});",
            js_string(name),
            js_string(value)
        ));
    }
    match &directive.source {
        ScriptSource::External { src } => {
            setup.push_str(&format!("s.src={};", js_string(src.as_str())));
        }
        ScriptSource::Inline { body } => {
            setup.push_str(&format!("s.text={};", js_string(body)));
        }
    }
    format!(
        "<script>window.addEventListener(\"load\",function(){{\
var s=document.createElement(\"script\");{setup}document.head.appendChild(s);}});</script>"
    )
}

fn attr_string(directive: &ScriptDirective) -> String {
    let mut out = String::new();
    if let Some(id) = &directive.id {
        out.push_str(&format!(" id=\"{}\"", html_escape(id)));
    }
    for (name, value) in &directive.attrs {
        if value.is_empty() {
            out.push_str(&format!(" {name}"));
        } else {
            out.push_str(&format!(" {name}=\"{}\"", html_escape(value)));
        }
    }
    out
}

/// Splice the rendered tags into `html`, immediately before the last
/// `</head>` (case-insensitive). Documents without a head get them before
/// `</body>`; fragments without either get them appended.
pub fn inject_into_html(html: &str, directives: &[ScriptDirective]) -> String {
    let tags = directives
        .iter()
        .map(render_directive)
        .collect::<Vec<_>>()
        .join("\n");
    if let Some(pos) = find_last_ci(html, "</head>") {
        splice(html, pos, &tags)
    } else if let Some(pos) = find_last_ci(html, "</body>") {
        splice(html, pos, &tags)
    } else {
        let mut out = html.to_string();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&tags);
        out.push('\n');
        out
    }
}

fn splice(html: &str, pos: usize, tags: &str) -> String {
    let mut out = String::with_capacity(html.len() + tags.len() + 1);
    out.push_str(&html[..pos]);
    out.push_str(tags);
    out.push('\n');
    out.push_str(&html[pos..]);
    out
}

fn find_last_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().rfind(needle)
}

fn js_string(raw: &str) -> String {
    // A JSON string literal is a valid JavaScript string literal.
    serde_json::to_string(raw).expect("script text serialization")
}

pub fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn external(url: &str) -> ScriptDirective {
        ScriptDirective::external(Url::parse(url).unwrap())
    }

    #[test]
    fn eager_external_renders_src_attribute() {
        let tag = render_directive(
            &external("https://example.com/app.js").with_strategy(LoadStrategy::Eager),
        );
        assert_eq!(tag, "<script src=\"https://example.com/app.js\"></script>");
    }

    #[test]
    fn eager_inline_keeps_body_verbatim() {
        let tag = render_directive(
            &ScriptDirective::inline("console.log('hi');\n")
                .with_id("boot")
                .with_strategy(LoadStrategy::Eager),
        );
        assert_eq!(tag, "<script id=\"boot\">\nconsole.log('hi');\n</script>");
    }

    #[test]
    fn lazy_inline_embeds_body_as_string_literal() {
        let tag = render_directive(&ScriptDirective::inline("var a = \"x\";\n").with_id("boot"));
        assert!(tag.contains("window.addEventListener(\"load\""));
        assert!(tag.contains("s.id=\"boot\";"));
        assert!(tag.contains("s.text=\"var a = \\\"x\\\";\\n\";"));
        assert!(!tag.contains("defer"));
    }

    #[test]
    fn attr_values_are_escaped() {
        let tag = render_directive(
            &ScriptDirective::inline("1;")
                .with_strategy(LoadStrategy::Eager)
                .with_attr("data-note", "a<b>\"c\"&d"),
        );
        assert!(tag.contains("data-note=\"a&lt;b&gt;&quot;c&quot;&amp;d\""));
    }

    #[test]
    fn fragment_without_head_or_body_gets_tags_appended() {
        let out = inject_into_html("<p>hi</p>", &[external("https://example.com/a.js")]);
        assert!(out.starts_with("<p>hi</p>\n<script>"));
    }
}
