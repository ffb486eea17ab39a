//! Catalog document parsing.
//!
//! # Format
//!
//! ```xml
//! <assets>
//!   <asset>
//!     <name>CoolPack</name>
//!     <filename>coolpack.zip</filename>
//!     <division>minecraft@rp</division>
//!     <description>A cool resource pack</description>
//!     <url>https://example.com/coolpack.zip</url>
//!   </asset>
//! </assets>
//! ```
//!
//! Every `asset` element in the document becomes one [`Asset`], whatever its
//! depth. Missing fields parse as empty strings.

use roxmltree::{Document, Node};

use super::Asset;
use crate::error::{AssetError, AssetResult};

/// Element name of a catalog entry.
const ASSET_TAG: &str = "asset";

/// Parse catalog bytes into assets in document order.
///
/// Only a document that is not well-formed UTF-8 XML is an error; entries
/// with missing or unknown child elements are accepted as they are.
pub fn parse_catalog(bytes: &[u8]) -> AssetResult<Vec<Asset>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| AssetError::MalformedCatalog(format!("not valid UTF-8: {}", e)))?;

    let doc = Document::parse(text).map_err(|e| AssetError::MalformedCatalog(e.to_string()))?;

    let assets = doc
        .descendants()
        .filter(|node| node.has_tag_name(ASSET_TAG))
        .map(|node| Asset {
            name: field(node, "name"),
            filename: field(node, "filename"),
            division: field(node, "division"),
            description: field(node, "description"),
            url: field(node, "url"),
        })
        .collect();

    Ok(assets)
}

/// Text of all direct children named `tag`, trimmed.
fn field(asset: Node<'_, '_>, tag: &str) -> String {
    let text: String = asset
        .children()
        .filter(|child| child.has_tag_name(tag))
        .flat_map(|child| child.descendants())
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();

    // Pretty-printed catalogs indent field text; the padding is not data.
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<assets>
  <asset>
    <name>CoolPack</name>
    <filename>coolpack.zip</filename>
    <division>minecraft@rp</division>
    <description>A cool resource pack</description>
    <url>https://example.com/coolpack.zip</url>
  </asset>
  <asset>
    <name>Sodium</name>
    <filename>sodium.jar</filename>
    <division>minecraft@mod</division>
    <description></description>
    <url>https://example.com/sodium.jar</url>
  </asset>
</assets>
"#;

    #[test]
    fn test_parse_sample() {
        let assets = parse_catalog(SAMPLE.as_bytes()).unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].name, "CoolPack");
        assert_eq!(assets[0].filename, "coolpack.zip");
        assert_eq!(assets[0].division, "minecraft@rp");
        assert_eq!(assets[0].description, "A cool resource pack");
        assert_eq!(assets[0].url, "https://example.com/coolpack.zip");
        assert_eq!(assets[1].name, "Sodium");
        assert_eq!(assets[1].description, "");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let assets = parse_catalog(b"<assets><asset><name>Lonely</name></asset></assets>").unwrap();

        assert_eq!(
            assets,
            vec![Asset {
                name: "Lonely".to_string(),
                filename: String::new(),
                division: String::new(),
                description: String::new(),
                url: String::new(),
            }]
        );
    }

    #[test]
    fn test_empty_asset_element_still_yields_record() {
        let assets = parse_catalog(b"<assets><asset/><asset></asset></assets>").unwrap();
        assert_eq!(assets.len(), 2);
        assert!(assets.iter().all(|a| a.name.is_empty()));
    }

    #[test]
    fn test_document_order_and_duplicates_kept() {
        let xml = b"<assets>\
            <asset><name>b</name></asset>\
            <asset><name>a</name></asset>\
            <asset><name>B</name></asset>\
            </assets>";
        let names: Vec<_> = parse_catalog(xml)
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();

        assert_eq!(names, vec!["b", "a", "B"]);
    }

    #[test]
    fn test_nested_assets_are_found() {
        let xml = b"<catalog><section><asset><name>Deep</name></asset></section></catalog>";
        let assets = parse_catalog(xml).unwrap();
        assert_eq!(assets[0].name, "Deep");
    }

    #[test]
    fn test_whitespace_and_entities() {
        let xml = b"<assets><asset>\n  <name>\n    Fish &amp; Chips\n  </name>\n\
            <url><![CDATA[https://example.com/a?b=1&c=2]]></url></asset></assets>";
        let assets = parse_catalog(xml).unwrap();

        assert_eq!(assets[0].name, "Fish & Chips");
        assert_eq!(assets[0].url, "https://example.com/a?b=1&c=2");
    }

    #[test]
    fn test_no_assets_is_empty_catalog() {
        assert!(parse_catalog(b"<assets/>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_markup_fails() {
        let err = parse_catalog(b"<assets><asset><name>x</asset>").unwrap_err();
        assert!(matches!(err, AssetError::MalformedCatalog(_)));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            parse_catalog(b"").unwrap_err(),
            AssetError::MalformedCatalog(_)
        ));
    }

    #[test]
    fn test_invalid_utf8_fails() {
        assert!(matches!(
            parse_catalog(&[0x3c, 0xff, 0xfe, 0x3e]).unwrap_err(),
            AssetError::MalformedCatalog(_)
        ));
    }
}
