//! DOM presentation for the browser build
//!
//! Every entity is an absolutely positioned element inside the `[game]`
//! container. The stylesheet decides how things look; this module only
//! creates elements, attaches/detaches them and writes positions.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use super::{Entity, Layout, Stage};
use crate::consts::PAIR_COUNT;
use crate::sim::Run;
use crate::sim::geometry::Size;

fn create(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    document.create_element(tag)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

fn with_class(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let element = create(document, tag)?;
    element.set_class_name(class);
    Ok(element)
}

fn with_id(document: &Document, tag: &str, id: &str) -> Result<HtmlElement, JsValue> {
    let element = create(document, tag)?;
    element.set_id(id);
    Ok(element)
}

fn set_px(element: &HtmlElement, property: &str, value: f32) {
    if let Err(e) = element.style().set_property(property, &format!("{value}px")) {
        log::warn!("Failed to set {}: {:?}", property, e);
    }
}

/// One barrier: a body that grows with the segment, and a fixed border cap
struct Barrier {
    element: HtmlElement,
    body: HtmlElement,
}

impl Barrier {
    /// `reverse` puts the cap on top (for the bottom barrier)
    fn new(document: &Document, reverse: bool) -> Result<Self, JsValue> {
        let element = with_class(document, "div", "barrier")?;
        let border = with_class(document, "div", "border")?;
        let body = with_class(document, "div", "body")?;
        if reverse {
            element.append_child(&border)?;
            element.append_child(&body)?;
        } else {
            element.append_child(&body)?;
            element.append_child(&border)?;
        }
        Ok(Self { element, body })
    }

    fn set_height(&self, height: f32) {
        set_px(&self.body, "height", height);
    }
}

struct PairElements {
    element: HtmlElement,
    top: Barrier,
    bottom: Barrier,
}

impl PairElements {
    fn new(document: &Document) -> Result<Self, JsValue> {
        let element = with_class(document, "div", "barriers-pair")?;
        let top = Barrier::new(document, false)?;
        let bottom = Barrier::new(document, true)?;
        element.append_child(&top.element)?;
        element.append_child(&bottom.element)?;
        Ok(Self {
            element,
            top,
            bottom,
        })
    }
}

/// Stage backed by DOM elements
pub struct DomStage {
    area: HtmlElement,
    hero: HtmlElement,
    play_button: HtmlElement,
    avatar: HtmlElement,
    pairs: Vec<PairElements>,
    score: HtmlElement,
    high_score: HtmlElement,
    restart_button: HtmlElement,
}

impl DomStage {
    /// Build (but do not attach) every element the game uses
    pub fn new(document: &Document, area: HtmlElement) -> Result<Self, JsValue> {
        let hero = with_id(document, "img", "hero")?;
        hero.set_attribute("src", "./assets/img/hero.svg")?;

        let play_button = with_id(document, "button", "play")?;
        play_button.set_text_content(Some("Play"));

        let avatar = with_id(document, "img", "bird")?;
        avatar.set_attribute("src", "./assets/img/bird.gif")?;

        let pairs = (0..PAIR_COUNT)
            .map(|_| PairElements::new(document))
            .collect::<Result<Vec<_>, _>>()?;

        let score = with_id(document, "div", "progress")?;
        score.style().set_property("z-index", "1")?;

        let high_score = with_id(document, "div", "highscore")?;

        let restart_button = with_class(document, "button", "restart")?;
        restart_button.set_text_content(Some("↺"));

        Ok(Self {
            area,
            hero,
            play_button,
            avatar,
            pairs,
            score,
            high_score,
            restart_button,
        })
    }

    pub fn play_button(&self) -> &HtmlElement {
        &self.play_button
    }

    pub fn restart_button(&self) -> &HtmlElement {
        &self.restart_button
    }

    /// Handles for reading rendered geometry
    pub fn layout(&self) -> DomLayout {
        DomLayout {
            area: self.area.clone(),
            avatar: self.avatar.clone(),
            pairs: self.pairs.iter().map(|p| p.element.clone()).collect(),
        }
    }

    /// Write the run's positions into element styles
    pub fn render(&self, run: &Run) {
        set_px(&self.avatar, "bottom", run.avatar.y());
        for (elements, pair) in self.pairs.iter().zip(run.obstacles.pairs()) {
            set_px(&elements.element, "left", pair.x());
            elements.top.set_height(pair.top_height());
            elements.bottom.set_height(pair.bottom_height());
        }
    }

    fn elements(&self, entity: Entity) -> Vec<&HtmlElement> {
        match entity {
            Entity::Menu => vec![&self.hero, &self.play_button],
            Entity::Avatar => vec![&self.avatar],
            Entity::Obstacle(index) => self.pairs.get(index).map(|p| &p.element).into_iter().collect(),
            Entity::Score => vec![&self.score],
            Entity::HighScore => vec![&self.high_score],
            Entity::RestartButton => vec![&self.restart_button],
        }
    }
}

impl Stage for DomStage {
    fn mount(&mut self, entity: Entity) {
        for element in self.elements(entity) {
            if let Err(e) = self.area.append_child(element) {
                log::warn!("Failed to mount {:?}: {:?}", entity, e);
            }
        }
    }

    fn unmount(&mut self, entity: Entity) {
        for element in self.elements(entity) {
            element.remove();
        }
    }

    fn show_score(&mut self, points: i64) {
        self.score.set_text_content(Some(&points.to_string()));
    }

    fn show_high_score(&mut self, points: i64) {
        self.high_score.set_text_content(Some(&format!("H:{points}")));
    }
}

/// Layout measured from the live DOM
pub struct DomLayout {
    area: HtmlElement,
    avatar: HtmlElement,
    pairs: Vec<HtmlElement>,
}

impl Layout for DomLayout {
    fn play_area(&self) -> Size {
        let rect = self.area.get_bounding_client_rect();
        Size::new(rect.width() as f32, rect.height() as f32)
    }

    fn obstacle_width(&self, index: usize) -> f32 {
        self.pairs
            .get(index)
            .map_or(0.0, |pair| pair.get_bounding_client_rect().width() as f32)
    }

    fn avatar_size(&self) -> Size {
        let rect = self.avatar.get_bounding_client_rect();
        Size::new(rect.width() as f32, rect.height() as f32)
    }

    fn avatar_left(&self) -> f32 {
        let avatar = self.avatar.get_bounding_client_rect();
        let area = self.area.get_bounding_client_rect();
        (avatar.left() - area.left()) as f32
    }
}
