//! Parsers for the XML catalog responses
//!
//! Documents have the shape
//!
//! ```xml
//! <result>
//!   <module id="org.demo" name="Demo">
//!     <version>1.2</version>
//!     <license spdx="MIT" file="demo/LICENSE">MIT License</license>
//!     <dependency>
//!       <module id="org.core"/>
//!       <library maven="g:a:1"/>
//!       <library jar="helper.jar" optional="true"/>
//!     </dependency>
//!     <icon>icons/demo.png</icon>
//!   </module>
//! </result>
//! ```
//!
//! The whole document is parsed before any record is built, so a malformed
//! body never yields a partial list.

use crate::domain::{Addon, Dependency, License};
use crate::error::CatalogError;
use roxmltree::{Document, Node};

/// An addon together with the icon path sent alongside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddon {
    pub addon: Addon,
    pub icon: Option<String>,
}

/// Which children of a `<module>` element to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Detail {
    /// Every known child
    Full,
    /// Only `<license>` and `<dependency>`
    DependenciesOnly,
}

/// Parses the `list` response into addons, in document order
pub fn parse_addon_list(body: &str, operation: &str) -> Result<Vec<ParsedAddon>, CatalogError> {
    let doc = Document::parse(body).map_err(|e| CatalogError::xml(operation, None, e))?;

    module_elements(doc.root_element())
        .map(|node| parse_module(node, Detail::Full, operation, None))
        .collect()
}

/// Parses the `addondep` response.
///
/// Only the license and dependency children are read. Fails with
/// `NoRecord` if the document has no `<module>` element.
pub fn parse_addon_dependency(
    body: &str,
    operation: &str,
    addon_id: &str,
) -> Result<Addon, CatalogError> {
    let doc = Document::parse(body).map_err(|e| CatalogError::xml(operation, Some(addon_id), e))?;

    let node = module_elements(doc.root_element())
        .next()
        .ok_or_else(|| CatalogError::no_record(operation, addon_id))?;

    parse_module(node, Detail::DependenciesOnly, operation, Some(addon_id)).map(|p| p.addon)
}

fn module_elements<'a, 'input>(
    root: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    root.children()
        .filter(|n| n.is_element() && n.tag_name().name() == "module")
}

fn parse_module(
    node: Node,
    detail: Detail,
    operation: &str,
    requested_id: Option<&str>,
) -> Result<ParsedAddon, CatalogError> {
    let id = match (node.attribute("id"), requested_id) {
        (Some(id), _) => id,
        (None, Some(requested)) => requested,
        (None, None) => {
            return Err(CatalogError::malformed(
                operation,
                None,
                "<module> element without 'id' attribute",
            ))
        }
    };
    let name = node.attribute("name").unwrap_or(id);

    let mut addon = Addon::new(id, name);
    let mut icon = None;

    for child in node.children().filter(Node::is_element) {
        match (child.tag_name().name(), detail) {
            ("license", _) => addon.license = parse_license(child),
            ("dependency", _) => parse_dependencies(child, &mut addon, operation)?,
            ("description", Detail::Full) => addon.item.description = non_empty_text(child),
            ("version", Detail::Full) => addon.item.version = element_text(child),
            ("homepage", Detail::Full) => addon.item.homepage = non_empty_text(child),
            ("provider", Detail::Full) => addon.item.provider = non_empty_text(child),
            ("icon", Detail::Full) => icon = non_empty_text(child),
            _ => {}
        }
    }

    Ok(ParsedAddon { addon, icon })
}

fn parse_license(node: Node) -> License {
    License {
        text: non_empty_text(node),
        spdx: node.attribute("spdx").map(str::to_string),
        file: node.attribute("file").map(str::to_string),
    }
}

/// Appends the children of a `<dependency>` element to the addon, in document order
fn parse_dependencies(node: Node, addon: &mut Addon, operation: &str) -> Result<(), CatalogError> {
    for child in node.children().filter(Node::is_element) {
        let dependency = match child.tag_name().name() {
            "module" => match child.attribute("id") {
                Some(id) => Dependency::module(id),
                None => {
                    return Err(CatalogError::malformed(
                        operation,
                        Some(addon.id()),
                        "module dependency without 'id' attribute",
                    ))
                }
            },
            "library" => {
                if let Some(coordinate) = child.attribute("maven") {
                    Dependency::maven(coordinate)
                } else if let Some(jar) = child.attribute("jar") {
                    Dependency::jar(jar)
                } else {
                    return Err(CatalogError::malformed(
                        operation,
                        Some(addon.id()),
                        "library dependency without 'maven' or 'jar' attribute",
                    ));
                }
            }
            _ => continue,
        };

        let optional = child
            .attribute("optional")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));
        addon.add_dependency(if optional {
            dependency.optional()
        } else {
            dependency
        });
    }

    Ok(())
}

/// Concatenated text content of an element, trimmed
fn element_text(node: Node) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn non_empty_text(node: Node) -> Option<String> {
    let text = element_text(node);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
