//! UI layout extraction from the device accessibility tree

use crate::command::CommandRunner;
use crate::config::UI_DUMP_FILE;
use crate::error::{AdbError, Result};
use crate::repo::AdbRepo;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

lazy_static! {
    /// One `[x,y]` coordinate pair inside a bounds string.
    static ref BOUNDS_RE: Regex = Regex::new(r"\[(\d+),(\d+)\]").unwrap();
}

/// Message returned when no clickable element carries text or a description.
pub const NO_ELEMENTS_MESSAGE: &str = "No clickable elements found with text or description";

/// Pixel coordinates of a tap target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A clickable UI node carrying text or a content description
#[derive(Debug, Clone, Serialize)]
pub struct ScreenElement {
    pub text: String,
    pub description: String,
    /// Raw `[x1,y1][x2,y2]` bounds attribute
    pub bounds: String,
    /// Midpoint of the bounds corners; absent when the bounds attribute does
    /// not yield two coordinate pairs
    pub center: Option<Point>,
}

impl ScreenElement {
    fn render(&self) -> String {
        let mut block = String::from("Clickable element:");
        if !self.text.is_empty() {
            block.push_str(&format!("\n  Text: {}", self.text));
        }
        if !self.description.is_empty() {
            block.push_str(&format!("\n  Description: {}", self.description));
        }
        block.push_str(&format!("\n  Bounds: {}", self.bounds));
        if let Some(center) = self.center {
            block.push_str(&format!("\n  Center: ({}, {})", center.x, center.y));
        }
        block
    }
}

impl<R: CommandRunner> AdbRepo<R> {
    /// Dump the accessibility tree and render its clickable elements as
    /// blank-line-separated blocks with computed tap centers.
    ///
    /// Returns [`NO_ELEMENTS_MESSAGE`] when the tree has no qualifying
    /// nodes, distinguishing "nothing found" from a parse failure.
    pub async fn get_ui_layout(&self) -> Result<String> {
        let elements = self.get_ui_elements().await?;
        Ok(render_elements(&elements))
    }

    /// Dump the accessibility tree and extract its clickable elements.
    ///
    /// The remote dump file is removed on every exit path; a cleanup failure
    /// fails the operation. Elements whose bounds cannot be parsed are kept
    /// without a center.
    pub async fn get_ui_elements(&self) -> Result<Vec<ScreenElement>> {
        std::fs::create_dir_all(self.work_dir())?;
        let remote = self.remote_scratch_path("uidump", "xml");
        let local = self.work_dir().join(UI_DUMP_FILE);

        let fetched = self.dump_and_pull(&remote, &local).await;
        let cleanup = self.remove_remote(&remote).await;
        fetched?;
        cleanup?;

        let xml = tokio::fs::read_to_string(&local).await?;
        let doc = roxmltree::Document::parse(&xml).map_err(|source| AdbError::UiParse {
            path: local.clone(),
            source,
        })?;

        let elements = extract_clickable_elements(&doc);
        debug!("extracted {} clickable elements", elements.len());
        Ok(elements)
    }

    async fn dump_and_pull(&self, remote: &str, local: &Path) -> Result<()> {
        self.shell(&format!("uiautomator dump {}", remote))
            .await
            .map_err(|err| AdbError::UiDump(err.to_string()))?;
        self.pull(remote, local)
            .await
            .map_err(|err| AdbError::UiDump(err.to_string()))?;
        Ok(())
    }
}

/// Clickable nodes carrying text or a content description, in document order.
fn extract_clickable_elements(doc: &roxmltree::Document) -> Vec<ScreenElement> {
    doc.descendants()
        .filter(|node| {
            node.has_tag_name("node") && node.attribute("clickable") == Some("true")
        })
        .filter_map(|node| {
            let text = node.attribute("text").unwrap_or_default();
            let description = node.attribute("content-desc").unwrap_or_default();
            if text.is_empty() && description.is_empty() {
                return None;
            }
            let bounds = node.attribute("bounds").unwrap_or_default();
            Some(ScreenElement {
                text: text.to_string(),
                description: description.to_string(),
                bounds: bounds.to_string(),
                center: parse_center(bounds),
            })
        })
        .collect()
}

/// Integer-truncated midpoint of the first two `[x,y]` pairs in a bounds
/// string; `None` when fewer than two pairs match.
pub fn parse_center(bounds: &str) -> Option<Point> {
    let mut corners = BOUNDS_RE.captures_iter(bounds).map(|caps| {
        let x = caps[1].parse::<i32>().unwrap_or(0);
        let y = caps[2].parse::<i32>().unwrap_or(0);
        (x, y)
    });
    let (x1, y1) = corners.next()?;
    let (x2, y2) = corners.next()?;
    Some(Point {
        x: (x1 + x2) / 2,
        y: (y1 + y2) / 2,
    })
}

fn render_elements(elements: &[ScreenElement]) -> String {
    if elements.is_empty() {
        return NO_ELEMENTS_MESSAGE.to_string();
    }
    elements
        .iter()
        .map(ScreenElement::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}
