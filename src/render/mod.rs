//! DOM renderer
//!
//! Syncs simulation state to the page once per frame: puppet container
//! position, limb rotations, balloon divs (created/moved/removed keyed by
//! balloon id), the three SVG string lines, the HUD counters and the
//! game-over overlay. The renderer owns the element handles; the simulation
//! never touches the DOM.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::sim::{Balloon, GameState, Phase, StringLine};

pub struct DomRenderer {
    document: Document,
    stage: HtmlElement,
    puppet: HtmlElement,
    arm_l: HtmlElement,
    arm_r: HtmlElement,
    leg_l: HtmlElement,
    leg_r: HtmlElement,
    score_el: Element,
    time_el: Element,
    strings_svg: Element,
    s_head: Element,
    s_left: Element,
    s_right: Element,
    overlay: Element,
    final_score: Element,
    /// Balloon id -> live balloon div
    balloon_els: HashMap<u32, HtmlElement>,
}

fn html_el(document: &Document, id: &str) -> HtmlElement {
    document
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("missing #{id}"))
        .dyn_into()
        .unwrap_or_else(|_| panic!("#{id} is not an html element"))
}

fn el(document: &Document, id: &str) -> Element {
    document
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("missing #{id}"))
}

impl DomRenderer {
    /// Grab every layout anchor. Missing anchors are a hard startup failure;
    /// there is no degraded mode without a stage to draw on.
    pub fn new(document: &Document) -> Self {
        Self {
            stage: html_el(document, "stage"),
            puppet: html_el(document, "puppet"),
            arm_l: html_el(document, "armL"),
            arm_r: html_el(document, "armR"),
            leg_l: html_el(document, "legL"),
            leg_r: html_el(document, "legR"),
            score_el: el(document, "score"),
            time_el: el(document, "time"),
            strings_svg: el(document, "strings"),
            s_head: el(document, "s-head"),
            s_left: el(document, "s-left"),
            s_right: el(document, "s-right"),
            overlay: el(document, "game-over"),
            final_score: el(document, "final-score"),
            balloon_els: HashMap::new(),
            document: document.clone(),
        }
    }

    /// Measure the stage: viewport size, floor line and rig anchor, all in
    /// stage coordinates. Called at startup and on every viewport resize.
    pub fn measure(&self) -> (f32, f32, f32, Vec2) {
        let window = web_sys::window().expect("no window");
        let width = window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0) as f32;
        let height = window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0) as f32;

        let stage_rect = self.stage.get_bounding_client_rect();
        let floor_y = self
            .document
            .get_element_by_id("floor")
            .map(|floor| floor.get_bounding_client_rect().top() as f32)
            .unwrap_or(height - 64.0)
            - stage_rect.top() as f32;

        let rig_anchor = self
            .document
            .get_element_by_id("rig")
            .map(|rig| {
                let rect = rig.get_bounding_client_rect();
                Vec2::new(
                    ((rect.left() + rect.right()) * 0.5 - stage_rect.left()) as f32,
                    (rect.bottom() - stage_rect.top()) as f32 - 2.0,
                )
            })
            .unwrap_or(Vec2::new(width * 0.5, 70.0));

        (width, height, floor_y, rig_anchor)
    }

    pub fn render(&mut self, state: &GameState) {
        self.render_puppet(state);
        self.render_balloons(state);
        self.render_strings(state);
        self.render_hud(state);
    }

    fn render_puppet(&self, state: &GameState) {
        let puppet = &state.puppet;
        let style = self.puppet.style();
        let _ = style.set_property("left", &format!("{}px", puppet.pos.x));
        let _ = style.set_property("top", &format!("{}px", puppet.pos.y));

        let rotate = |limb: &HtmlElement, angle: f32| {
            let _ = limb
                .style()
                .set_property("transform", &format!("rotate({angle}deg)"));
        };
        rotate(&self.arm_l, puppet.arm_l.angle);
        rotate(&self.arm_r, puppet.arm_r.angle);
        rotate(&self.leg_l, puppet.leg_l.angle);
        rotate(&self.leg_r, puppet.leg_r.angle);
    }

    fn render_balloons(&mut self, state: &GameState) {
        let t = state.world.elapsed;

        for balloon in &state.balloons {
            let element = match self.balloon_els.get(&balloon.id) {
                Some(element) => element.clone(),
                None => {
                    let element = self.create_balloon_el(balloon);
                    self.balloon_els.insert(balloon.id, element.clone());
                    element
                }
            };

            let style = element.style();
            let _ = style.set_property("left", &format!("{}px", balloon.pos.x));
            let _ = style.set_property("top", &format!("{}px", balloon.pos.y));
            let _ = style.set_property(
                "transform",
                &format!("translate(-50%, -50%) rotate({}deg)", balloon.rotation(t)),
            );
            if balloon.popped && !element.class_list().contains("pop") {
                let _ = element.class_list().add_1("pop");
            }
        }

        // Drop divs whose balloon is gone (despawned or pop window elapsed)
        self.balloon_els.retain(|id, element| {
            let live = state.balloons.iter().any(|b| b.id == *id);
            if !live {
                element.remove();
            }
            live
        });
    }

    fn create_balloon_el(&self, balloon: &Balloon) -> HtmlElement {
        let element: HtmlElement = self
            .document
            .create_element("div")
            .expect("create balloon div")
            .dyn_into()
            .expect("balloon div is html");
        element.set_class_name("balloon");
        if let Some(class) = balloon.color.css_class() {
            let _ = element.class_list().add_1(class);
        }

        // Tail pieces
        for tail_class in ["knot", "string"] {
            if let Ok(tail) = self.document.create_element("div") {
                tail.set_class_name(tail_class);
                let _ = element.append_child(&tail);
            }
        }

        let _ = self.stage.append_child(&element);
        element
    }

    fn render_strings(&self, state: &GameState) {
        let world = &state.world;
        let _ = self.strings_svg.set_attribute(
            "viewBox",
            &format!("0 0 {} {}", world.width, world.height),
        );

        let set_line = |line_el: &Element, line: &StringLine| {
            let _ = line_el.set_attribute("x1", &line.from.x.to_string());
            let _ = line_el.set_attribute("y1", &line.from.y.to_string());
            let _ = line_el.set_attribute("x2", &line.to.x.to_string());
            let _ = line_el.set_attribute("y2", &line.to.y.to_string());
        };
        set_line(&self.s_head, &state.strings.head);
        set_line(&self.s_left, &state.strings.left);
        set_line(&self.s_right, &state.strings.right);
    }

    fn render_hud(&self, state: &GameState) {
        self.score_el
            .set_text_content(Some(&state.score.to_string()));
        self.time_el
            .set_text_content(Some(&state.time_left.to_string()));

        if state.phase == Phase::Over {
            self.final_score
                .set_text_content(Some(&state.score.to_string()));
            let _ = self.overlay.class_list().remove_1("hidden");
        } else if !self.overlay.class_list().contains("hidden") {
            let _ = self.overlay.class_list().add_1("hidden");
        }
    }
}
