//! Whitelist HTML filter applied to user-supplied text before it is returned
//! to clients.
//!
//! Known-harmless tags are rebuilt with only their whitelisted attributes.
//! Every other tag, and every stray angle bracket, is escaped so that the
//! markup shows up as visible text instead of being interpreted:
//!
//! ```
//! use noteful_core::sanitize::sanitize;
//!
//! assert_eq!(
//!     sanitize(r#"Naughty <script>alert("xss");</script>"#),
//!     r#"Naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#,
//! );
//! assert_eq!(sanitize("<strong>all</strong>"), "<strong>all</strong>");
//! ```
//!
//! The output is a fixed point: `sanitize(sanitize(x)) == sanitize(x)`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

// ---------------------------------------------------------------------------
// Whitelist
// ---------------------------------------------------------------------------

/// Tags that survive sanitization, with the attributes each may keep.
const ALLOWED_TAGS: &[(&str, &[&str])] = &[
    ("a", &["href", "title", "target"]),
    ("b", &[]),
    ("blockquote", &[]),
    ("br", &[]),
    ("code", &[]),
    ("del", &[]),
    ("div", &[]),
    ("em", &[]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    ("hr", &[]),
    ("i", &[]),
    ("img", &["src", "alt", "title", "width", "height"]),
    ("li", &[]),
    ("ol", &[]),
    ("p", &[]),
    ("pre", &[]),
    ("s", &[]),
    ("small", &[]),
    ("span", &[]),
    ("strong", &[]),
    ("sub", &[]),
    ("sup", &[]),
    ("table", &[]),
    ("tbody", &[]),
    ("td", &[]),
    ("th", &[]),
    ("thead", &[]),
    ("tr", &[]),
    ("u", &[]),
    ("ul", &[]),
];

/// Attributes whose values are URLs and must use a safe scheme.
const URL_ATTRIBUTES: &[&str] = &["href", "src"];

/// URL prefixes considered safe. Values without any scheme are also allowed.
const SAFE_URL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "#", "/", "./", "../"];

/// Named character references decoded before a URL's scheme is checked.
/// Matched case-insensitively; any other named reference empties the URL.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("apos", '\''),
    ("colon", ':'),
    ("gt", '>'),
    ("lpar", '('),
    ("lt", '<'),
    ("nbsp", '\u{a0}'),
    ("newline", '\n'),
    ("num", '#'),
    ("period", '.'),
    ("quot", '"'),
    ("rpar", ')'),
    ("sol", '/'),
    ("tab", '\t'),
];

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^<\s*(/?)\s*([A-Za-z][A-Za-z0-9]*)(.*?)(/?)\s*>$").expect("valid regex")
});

/// Numeric references may omit the trailing `;`, as browsers accept them
/// that way too.
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]+);?|#[xX]([0-9A-Fa-f]+);?|([A-Za-z][A-Za-z0-9]*);)")
        .expect("valid regex")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("valid regex")
});

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Neutralize executable markup in `input` while preserving its visible text.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&escape_brackets(&rest[..start]));
        let candidate = &rest[start..];

        match tag_end(candidate) {
            Some(end) => {
                out.push_str(&filter_tag(&candidate[..=end]));
                rest = &candidate[end + 1..];
            }
            None => {
                out.push_str("&lt;");
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(&escape_brackets(rest));
    out
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Byte index of the `>` closing the tag that starts at `candidate[0]`.
///
/// Quoted attribute values may contain `>`. Another `<` before the closing
/// bracket means the first one was a stray character, not a tag.
fn tag_end(candidate: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut last_significant = '<';

    for (idx, c) in candidate.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '>' => return Some(idx),
                '<' => return None,
                '"' | '\'' if last_significant == '=' => quote = Some(c),
                _ => {}
            },
        }
        if !c.is_whitespace() {
            last_significant = c;
        }
    }
    None
}

/// Rebuild a whitelisted tag, or escape anything else.
fn filter_tag(raw: &str) -> String {
    let Some(caps) = TAG_RE.captures(raw) else {
        return escape_brackets(raw);
    };

    let name = caps[2].to_ascii_lowercase();
    let Some(allowed_attrs) = allowed_attributes(&name) else {
        return escape_brackets(raw);
    };

    if !caps[1].is_empty() {
        return format!("</{name}>");
    }

    let mut tag = format!("<{name}");
    for attr in ATTR_RE.captures_iter(&caps[3]) {
        let attr_name = attr[1].to_ascii_lowercase();
        if !allowed_attrs.contains(&attr_name.as_str()) {
            continue;
        }

        let value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .or_else(|| attr.get(4))
            .map(|m| m.as_str());

        match value {
            Some(v) => {
                let v = if URL_ATTRIBUTES.contains(&attr_name.as_str()) {
                    safe_url(v)
                } else {
                    v
                };
                tag.push_str(&format!(" {attr_name}=\"{}\"", escape_attribute(v)));
            }
            None => {
                tag.push(' ');
                tag.push_str(&attr_name);
            }
        }
    }

    if !caps[4].is_empty() {
        tag.push_str(" /");
    }
    tag.push('>');
    tag
}

fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    ALLOWED_TAGS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, attrs)| *attrs)
}

/// Return the URL unchanged when its scheme is safe, otherwise an empty string.
///
/// The scheme is judged on the value a browser would see: character
/// references decoded, then control characters and whitespace removed.
fn safe_url(value: &str) -> &str {
    let Some(decoded) = decode_entities(value) else {
        return "";
    };
    let normalized: String = decoded
        .chars()
        .filter(|c| !c.is_control() && !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    if SAFE_URL_PREFIXES.iter().any(|p| normalized.starts_with(p)) || !normalized.contains(':') {
        value
    } else {
        ""
    }
}

/// Decode character references in an attribute value.
///
/// Returns `None` if any reference cannot be decoded.
fn decode_entities(value: &str) -> Option<String> {
    let mut undecodable = false;
    let decoded = ENTITY_RE.replace_all(value, |caps: &Captures| {
        let decoded = if let Some(dec) = caps.get(1) {
            dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16)
                .ok()
                .and_then(char::from_u32)
        } else {
            named_entity(&caps[3])
        };

        match decoded {
            Some(c) => c.to_string(),
            None => {
                undecodable = true;
                String::new()
            }
        }
    });

    if undecodable {
        None
    } else {
        Some(decoded.into_owned())
    }
}

fn named_entity(name: &str) -> Option<char> {
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| entity.eq_ignore_ascii_case(name))
        .map(|(_, c)| *c)
}

fn escape_brackets(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_brackets(value).replace('"', "&quot;")
}
