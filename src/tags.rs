//! Product tags ("dots") placed on a photo.
//!
//! Placing a tag is a two-step flow. A tap on the photo records a pending
//! [`NormalizedPoint`]; once the product lookup finishes, [`TagBoard::complete`]
//! turns it into a [`Dot`] carrying the product metadata. Dots store only
//! percentages, so they stay put across any layout change and are projected
//! back to screen points on demand.
//!
//! Persistence and posting are not handled here; [`Dot`] is `Serialize` so
//! callers can hand the finished list to whatever stores it.

use crate::config::TagConfig;
use crate::geometry::{self, GeometryError, Layout, NormalizedPoint, Point};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TagError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("no tag placement is pending")]
    NoPendingPlacement,
    #[error("no dot with id '{0}'")]
    UnknownDot(String),
}

/// Product details scraped from a store page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub title: String,
    pub price: String,
    pub currency: String,
    pub image_url: String,
    pub url: String,
}

/// A tag anchored to a position on the photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub id: String,
    pub title: String,
    pub price: String,
    pub currency: String,
    /// Empty when the product image was removed.
    pub image_url: String,
    pub url: String,
    #[serde(flatten)]
    pub position: NormalizedPoint,
    pub color: String,
}

/// The user-editable fields of a [`Dot`]. Saved all at once.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEdit {
    pub title: String,
    pub price: String,
    pub currency: String,
    pub image_url: String,
}

impl Dot {
    /// Current values, as the starting point for an edit.
    pub fn edit_fields(&self) -> ProductEdit {
        ProductEdit {
            title: self.title.clone(),
            price: self.price.clone(),
            currency: self.currency.clone(),
            image_url: self.image_url.clone(),
        }
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

/// The dots on one photo plus the placement in progress.
#[derive(Debug, Clone)]
pub struct TagBoard {
    dot_size: f64,
    dot_color: String,
    dots: Vec<Dot>,
    pending: Option<NormalizedPoint>,
    created: usize,
}

impl TagBoard {
    pub fn new(config: &TagConfig) -> Self {
        Self {
            dot_size: config.dot_size,
            dot_color: config.dot_color.clone(),
            dots: Vec::new(),
            pending: None,
            created: 0,
        }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn pending(&self) -> Option<NormalizedPoint> {
        self.pending
    }

    pub fn get(&self, id: &str) -> Option<&Dot> {
        self.dots.iter().find(|d| d.id == id)
    }

    /// Record a tap at `point` as the pending placement.
    ///
    /// The tap must be strictly more than one dot size inside the image;
    /// otherwise it is rejected and any earlier pending placement is kept.
    pub fn tap(&mut self, point: Point, layout: &Layout) -> Result<NormalizedPoint, TagError> {
        let position = geometry::screen_to_percent_inset(point, layout, self.dot_size)?;
        self.pending = Some(position);
        Ok(position)
    }

    /// Drop the pending placement (lookup cancelled).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Turn the pending placement into a dot carrying `product`.
    pub fn complete(&mut self, product: ProductData) -> Result<&Dot, TagError> {
        let position = self.pending.take().ok_or(TagError::NoPendingPlacement)?;
        let id = format!(
            "dot-{}-{:.2}-{:.2}",
            self.created, position.x_percent, position.y_percent
        );
        self.created += 1;
        debug!("tag created: {id} '{}'", product.title);

        self.dots.push(Dot {
            id,
            title: product.title,
            price: product.price,
            currency: product.currency,
            image_url: product.image_url,
            url: product.url,
            position,
            color: self.dot_color.clone(),
        });
        Ok(&self.dots[self.dots.len() - 1])
    }

    /// Replace the editable fields of dot `id`.
    pub fn edit(&mut self, id: &str, edit: ProductEdit) -> Result<&Dot, TagError> {
        let dot = self
            .dots
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| TagError::UnknownDot(id.to_string()))?;
        dot.title = edit.title;
        dot.price = edit.price;
        dot.currency = edit.currency;
        dot.image_url = edit.image_url;
        Ok(dot)
    }

    /// Remove dot `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Dot> {
        let index = self.dots.iter().position(|d| d.id == id)?;
        debug!("tag removed: {id}");
        Some(self.dots.remove(index))
    }

    /// Screen positions of every dot at `layout`, in creation order.
    pub fn positions(&self, layout: &Layout) -> Result<Vec<(&str, Point)>, GeometryError> {
        self.dots
            .iter()
            .map(|d| Ok((d.id.as_str(), geometry::percent_to_screen(d.position, layout)?)))
            .collect()
    }
}
