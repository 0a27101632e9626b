use nom::{
    bytes::complete::take_while1,
    combinator::{opt, rest},
    sequence::pair,
    IResult,
};

/// A parsed dependency or provides specifier.
///
/// apk specifiers are a bare name optionally followed by a comparison
/// operator (`=`, `>=`, `>`, `<=`, `<`, `~`) and a version, with no spaces:
/// `zlib`, `zlib>=1.2.11`, `cmd:ls=9.1-r2`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Specifier<'a> {
    pub name: &'a str,
    pub op: Option<&'a str>,
    pub version: Option<&'a str>,
}

// parser combinators
fn parse_name(s: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !matches!(c, '<' | '>' | '=' | '~'))(s)
}

fn parse_op(s: &str) -> IResult<&str, &str> {
    take_while1(|c: char| matches!(c, '<' | '>' | '=' | '~'))(s)
}

fn parse_constraint(s: &str) -> IResult<&str, (&str, &str)> {
    pair(parse_op, rest)(s)
}

pub(crate) fn parse_specifier(s: &str) -> Option<Specifier<'_>> {
    let (_, (name, constraint)) = pair(parse_name, opt(parse_constraint))(s).ok()?;
    let (op, version) = match constraint {
        Some((op, version)) => (Some(op), Some(version)),
        None => (None, None),
    };
    Some(Specifier { name, op, version })
}

/// The package or capability name of a specifier, with any trailing version
/// constraint stripped. Malformed specifiers are returned unchanged so they
/// can still be displayed.
pub fn bare_name(spec: &str) -> &str {
    match parse_specifier(spec) {
        Some(s) => s.name,
        None => spec,
    }
}

/// Soname-style specifiers (`so:libz.so.1`) reference shared libraries, not
/// packages, and are never resolved against the pool.
pub fn is_soname(spec: &str) -> bool {
    bare_name(spec).contains(':')
}

#[test]
fn test_parsers() {
    assert_eq!(
        parse_specifier("zlib"),
        Some(Specifier {
            name: "zlib",
            op: None,
            version: None
        })
    );
    assert_eq!(
        parse_specifier("zlib>=1.2.11-r3"),
        Some(Specifier {
            name: "zlib",
            op: Some(">="),
            version: Some("1.2.11-r3")
        })
    );
    assert_eq!(
        parse_specifier("foo~1.2"),
        Some(Specifier {
            name: "foo",
            op: Some("~"),
            version: Some("1.2")
        })
    );
    assert_eq!(bare_name("glibc=2.39-r1"), "glibc");
    assert_eq!(bare_name("openssl<3"), "openssl");
    assert_eq!(bare_name("busybox"), "busybox");
    // Operator with no name parses as malformed, returned verbatim
    assert_eq!(bare_name("=1.0"), "=1.0");
    assert!(is_soname("so:libc.musl-x86_64.so.1"));
    assert!(is_soname("cmd:ls=9.1-r2"));
    assert!(!is_soname("libcmd"));
}
