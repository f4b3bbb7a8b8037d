//! Tests for CST construction

use super::ast::{AstNode, Document, Element};
use super::*;

fn kinds_of(root: &MarkupSyntaxNode, kind: MarkupSyntaxKind) -> Vec<MarkupSyntaxNode> {
    root.descendants().filter(|n| n.kind() == kind).collect()
}

#[test]
fn test_dangling_close_tree_shape() {
    let (root, lexer_errors, parse_errors) = parse_markup("<div></");
    assert!(lexer_errors.is_empty());
    assert_eq!(parse_errors.len(), 1);
    assert_eq!(parse_errors[0].kind, ParseErrorKind::DanglingCloseTag);

    let tree = format!("{root:#?}");
    insta::assert_snapshot!(tree.trim_end(), @r#"
    Document@0..7
      Element@0..7
        OpenTag@0..5
          LAngle@0..1 "<"
          TagName@1..4
            Ident@1..4 "div"
          RAngle@4..5 ">"
        ErrorNode@5..7
          LAngle@5..6 "<"
          Slash@6..7 "/"
        CloseTag@7..7
    "#);
}

#[test]
fn test_phantom_close_sits_after_slash() {
    let (root, _, _) = parse_markup("<div><//>");
    let closes = kinds_of(&root, MarkupSyntaxKind::CloseTag);
    assert_eq!(closes.len(), 1);

    let close = ast::CloseTag::cast(closes[0].clone()).expect("close tag");
    assert!(close.is_phantom());
    assert_eq!(close.start(), TextSize::from(7));
    assert_eq!(root.text().to_string(), "<div><//>");
}

#[test]
fn test_lossless_round_trip() {
    let sources = [
        "",
        "plain text",
        "<div class=\"a\">\n  <Foo.Bar {...props} on:click={() => x}/>\n  <!-- note -->\n</div>",
        "<a><b></a>",
        "</stray>",
        "<div></",
        "<svg:rect width='1' /><p>unterminated",
        "<ul><li>one<li>two</ul>",
    ];

    for source in sources {
        let (root, _, _) = parse_markup(source);
        assert_eq!(root.text().to_string(), source, "lossless for {source:?}");
    }
}

#[test]
fn test_nested_elements() {
    let (root, lexer_errors, parse_errors) = parse_markup("<div><span>hi</span></div>");
    assert!(lexer_errors.is_empty());
    assert!(parse_errors.is_empty());

    let document = Document::cast(root).expect("document");
    let div = document.elements().next().expect("div element");
    assert_eq!(div.open_tag().expect("open").name(), "div");
    assert_eq!(div.close_tag().and_then(|c| c.name()), Some("div".to_string()));

    let span: Vec<Element> = div.child_elements().collect();
    assert_eq!(span.len(), 1);
    assert_eq!(span[0].open_tag().expect("open").name(), "span");
}

#[test]
fn test_self_closing_is_not_an_element() {
    let (root, _, parse_errors) = parse_markup("<div><br/><img src=\"x\" /></div>");
    assert!(parse_errors.is_empty());
    assert_eq!(kinds_of(&root, MarkupSyntaxKind::SelfClosingTag).len(), 2);
    assert_eq!(kinds_of(&root, MarkupSyntaxKind::OpenTag).len(), 1);

    let img = kinds_of(&root, MarkupSyntaxKind::SelfClosingTag)
        .into_iter()
        .filter_map(ast::SelfClosingTag::cast)
        .nth(1)
        .expect("img");
    assert_eq!(img.name(), "img");
}

#[test]
fn test_member_access_and_namespace_names_are_verbatim() {
    let (root, _, _) = parse_markup("<foo.Bar><svg:rect>");
    let names: Vec<String> = kinds_of(&root, MarkupSyntaxKind::OpenTag)
        .into_iter()
        .filter_map(ast::OpenTag::cast)
        .map(|open| open.name())
        .collect();
    assert_eq!(names, vec!["foo.Bar", "svg:rect"]);
}

#[test]
fn test_attributes_do_not_leak_into_name() {
    let (root, _, parse_errors) = parse_markup("<Button variant=\"primary\" disabled onClick={go}>");
    let open = kinds_of(&root, MarkupSyntaxKind::OpenTag)
        .into_iter()
        .find_map(ast::OpenTag::cast)
        .expect("open tag");
    assert_eq!(open.name(), "Button");
    assert_eq!(kinds_of(&root, MarkupSyntaxKind::Attribute).len(), 3);
    assert_eq!(parse_errors.len(), 1);
    assert_eq!(parse_errors[0].kind, ParseErrorKind::UnclosedElement);
}

#[test]
fn test_fragment_has_empty_name() {
    let (root, _, parse_errors) = parse_markup("<><a></a></>");
    assert!(parse_errors.is_empty());
    let fragment = kinds_of(&root, MarkupSyntaxKind::OpenTag)
        .into_iter()
        .find_map(ast::OpenTag::cast)
        .expect("fragment");
    assert!(fragment.is_fragment());
    assert_eq!(fragment.name(), "");
}

#[test]
fn test_close_tag_ends_innermost_element() {
    // `</a>` closes `<b>`; `<a>` stays open
    let (root, _, parse_errors) = parse_markup("<a><b></a>");
    let document = Document::cast(root).expect("document");
    let a = document.elements().next().expect("a");
    assert!(a.close_tag().is_none());
    let b = a.child_elements().next().expect("b");
    assert_eq!(b.close_tag().and_then(|c| c.name()), Some("a".to_string()));
    assert!(
        parse_errors
            .iter()
            .any(|e| e.kind == ParseErrorKind::UnclosedElement)
    );
}

#[test]
fn test_stray_close_tag_reported() {
    let (root, _, parse_errors) = parse_markup("</p><div>");
    assert_eq!(parse_errors[0].kind, ParseErrorKind::StrayCloseTag);
    assert_eq!(parse_errors[0].span, 0..4);
    assert_eq!(kinds_of(&root, MarkupSyntaxKind::CloseTag).len(), 1);
}

#[test]
fn test_unterminated_tag_recovers_at_next_tag() {
    let (root, _, parse_errors) = parse_markup("<div <span>");
    assert!(
        parse_errors
            .iter()
            .any(|e| e.kind == ParseErrorKind::UnterminatedTag)
    );
    assert_eq!(kinds_of(&root, MarkupSyntaxKind::OpenTag).len(), 2);
}

#[test]
fn test_comment_hides_tags() {
    let (root, _, _) = parse_markup("<div><!-- <span> --></div>");
    assert_eq!(kinds_of(&root, MarkupSyntaxKind::OpenTag).len(), 1);
}

#[test]
fn test_green_tree_builds_same_root() {
    let (green, _, _) = parse_markup_green("<p>x</p>");
    let root = MarkupSyntaxNode::new_root(green);
    assert_eq!(root.kind(), MarkupSyntaxKind::Document);
    assert_eq!(root.text().to_string(), "<p>x</p>");
}

#[test]
fn test_child_expression_is_content() {
    let (root, lexer_errors, parse_errors) =
        parse_markup("<div>{a < b}{useState<number>(0)}</div>");
    assert!(lexer_errors.is_empty());
    assert!(parse_errors.is_empty());
    assert_eq!(kinds_of(&root, MarkupSyntaxKind::OpenTag).len(), 1);
    assert_eq!(kinds_of(&root, MarkupSyntaxKind::CloseTag).len(), 1);
}

#[test]
fn test_close_slash_before_text_is_dangling() {
    let (root, _, parse_errors) = parse_markup("<p>hello</ world</p>");
    let phantom = kinds_of(&root, MarkupSyntaxKind::CloseTag)
        .into_iter()
        .find_map(ast::CloseTag::cast)
        .expect("close tag");
    assert!(phantom.is_phantom());
    assert_eq!(u32::from(phantom.start()), 10);
    assert!(
        parse_errors
            .iter()
            .any(|e| e.kind == ParseErrorKind::DanglingCloseTag)
    );
}
