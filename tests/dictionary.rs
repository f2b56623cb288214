//! Spellings the dictionaries and classifiers recognize, compiled end to end

use mightymath::math::ast::Node;
use mightymath::math::parse;
use mightymath::{compile, DisplayMode};
use rstest::rstest;

/// Markup between the `<math>` tags.
fn body(source: &str) -> String {
    let markup = compile(source, DisplayMode::Inline);
    markup
        .strip_prefix(r#"<math display="inline">"#)
        .and_then(|rest| rest.strip_suffix("</math>"))
        .unwrap_or(&markup)
        .to_string()
}

#[rstest]
#[case("alpha", "<mi>&alpha;</mi>")]
#[case("Omega", "<mi>&Omega;</mi>")]
#[case("\\theta", "<mi>&thetasym;</mi>")]
#[case("\\p", "<mi>&weierp;</mi>")]
#[case("inf", "<mi>&infin;</mi>")]
#[case("null", "<mi>&empty;</mi>")]
#[case("Re", "<mi>&real;</mi>")]
#[case("x", "<mi>x</mi>")]
#[case("A", r#"<mi mathvariant="normal">A</mi>"#)]
#[case("speed", "<mi>speed</mi>")]
#[case("'a&b'", "<mi>a&amp;b</mi>")]
fn identifiers(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(body(source), expected);
}

#[rstest]
#[case("a <= b", "&le;")]
#[case("a >= b", "&ge;")]
#[case("a != b", "&ne;")]
#[case("a === b", "&equiv;")]
#[case("a ~~ b", "&asymp;")]
#[case("a -> b", "&rarr;")]
#[case("a <=> b", "&hArr;")]
#[case("a in b", "&isin;")]
#[case("a !in b", "&notin;")]
#[case("a v b", "&or;")]
#[case("a cup b", "&cup;")]
#[case("a :<: b", "&sub;")]
#[case("a +/- b", "&plusmn;")]
#[case("a & b", "&amp;")]
fn binary_operators(#[case] source: &str, #[case] glyph: &str) {
    assert_eq!(
        body(source),
        format!("<mrow><mi>a</mi><mo>{}</mo><mi>b</mi></mrow>", glyph)
    );
}

#[rstest]
#[case("1 000", "<mn>1 000</mn>")]
#[case("3.14", "<mn>3.14</mn>")]
#[case("2,5", "<mn>2,5</mn>")]
fn numbers(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(body(source), expected);
}

#[rstest]
#[case("\"m/s\"", "<mtext>&thinsp;m/s&thinsp;</mtext>")]
#[case("\"5 \\um\"", "<mtext>&thinsp;5 &micro;m&thinsp;</mtext>")]
#[case("\"<b>\"", "<mtext>&thinsp;&lt;b&gt;&thinsp;</mtext>")]
fn quoted_text(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(body(source), expected);
}

#[rstest]
#[case("(x)", "(", ")")]
#[case("[x]", "[", "]")]
#[case("{x}", "{", "}")]
#[case("|_x_|", "&lfloor;", "&rfloor;")]
#[case("<x>", "&lang;", "&rang;")]
#[case("<<x>>", "&lAng;", "&rAng;")]
#[case("|:x:|", "&mid;", "&mid;")]
#[case("||:x:||", "&par;", "&par;")]
fn brackets(#[case] source: &str, #[case] left: &str, #[case] right: &str) {
    assert_eq!(
        body(source),
        format!(
            r#"<mrow><mo fence="true">{}</mo><mi>x</mi><mo fence="true">{}</mo></mrow>"#,
            left, right
        )
    );
}

#[test]
fn half_open_interval_closes_with_either_bracket() {
    assert_eq!(
        body("(3, 5]"),
        concat!(
            r#"<mrow><mo fence="true">(</mo>"#,
            "<mrow><mrow><mn>3</mn><mo>,</mo></mrow><mn>5</mn></mrow>",
            r#"<mo fence="true">]</mo></mrow>"#
        )
    );
}

#[test]
fn angle_bracket_needs_term_position() {
    let Node::Row { elements } = parse("a < b") else {
        panic!("expected a row");
    };
    assert_eq!(elements[1], Node::operator("&lt;"));
}

#[test]
fn differential_renders_as_spaced_d() {
    assert_eq!(
        body("$ x \\d x"),
        r#"<mrow><mo>&int;</mo><mi>x</mi><mspace width="thinmathspace" /><mi>d</mi><mi>x</mi></mrow>"#
    );
}
