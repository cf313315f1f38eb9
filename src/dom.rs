//! Browser presentation adapter
//!
//! Implements [`Presentation`] on top of the page's DOM: screens are
//! divs toggled with a `hidden` class, obstacles are absolutely positioned
//! `<img>` nodes, audio rides two `HtmlAudioElement`s. Host failures
//! (autoplay rejection, detached nodes) are swallowed; the simulation never
//! sees them.

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAudioElement, HtmlElement};

use crate::consts::{DUCK_RESTORE_DELAY_MS, DUCK_VOLUME, MUSIC_VOLUME, OBSTACLE_SPAWN_Y};
use crate::presentation::{Presentation, Screen};
use crate::sim::ObstacleId;

/// DOM handles for everything the game touches, resolved once at startup.
pub struct DomPresentation {
    document: Document,

    menu_screen: Element,
    game_screen: Element,
    game_over_screen: Element,

    score_value: Element,
    lives_value: Element,
    final_score: Element,

    player: HtmlElement,
    game_area: Element,
    obstacle_nodes: HashMap<ObstacleId, HtmlElement>,

    mute_button: Element,
    pause_button: Element,

    background_music: HtmlAudioElement,
    collision_sound: HtmlAudioElement,
}

fn require(document: &Document, id: &str) -> Element {
    document
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("missing element #{id}"))
}

impl DomPresentation {
    /// Resolve all page elements. Panics when the page is missing one;
    /// there is nothing sensible to do without the board.
    pub fn new(document: &Document) -> Self {
        let player: HtmlElement = require(document, "player")
            .dyn_into()
            .expect("#player is not an html element");

        let background_music =
            HtmlAudioElement::new_with_src("background-music.mp3").expect("audio element");
        background_music.set_loop(true);
        let collision_sound =
            HtmlAudioElement::new_with_src("collision-sound.mp3").expect("audio element");

        Self {
            document: document.clone(),
            menu_screen: require(document, "menu-screen"),
            game_screen: require(document, "game-screen"),
            game_over_screen: require(document, "game-over-screen"),
            score_value: require(document, "score-value"),
            lives_value: require(document, "lives-value"),
            final_score: require(document, "final-score"),
            player,
            game_area: require(document, "game-area"),
            obstacle_nodes: HashMap::new(),
            mute_button: require(document, "mute-button"),
            pause_button: require(document, "pause-button"),
            background_music,
            collision_sound,
        }
    }
}

impl Presentation for DomPresentation {
    fn show_screen(&mut self, screen: Screen) {
        let screens = [
            (&self.menu_screen, Screen::Menu),
            (&self.game_screen, Screen::Playing),
            (&self.game_over_screen, Screen::GameOver),
        ];
        for (element, which) in screens {
            if which == screen {
                let _ = element.class_list().remove_1("hidden");
            } else {
                let _ = element.class_list().add_1("hidden");
            }
        }
    }

    fn set_score(&mut self, score: u64) {
        self.score_value.set_text_content(Some(&score.to_string()));
    }

    fn set_lives(&mut self, lives: u8) {
        self.lives_value.set_text_content(Some(&lives.to_string()));
    }

    fn set_final_score(&mut self, score: u64) {
        self.final_score.set_text_content(Some(&score.to_string()));
    }

    fn set_player_position(&mut self, x_percent: f32) {
        let _ = self
            .player
            .style()
            .set_property("left", &format!("{x_percent}%"));
    }

    fn create_obstacle_visual(&mut self, id: ObstacleId, x_percent: f32) {
        let Ok(element) = self.document.create_element("img") else {
            return;
        };
        let _ = element.set_attribute("src", "obstacle.png");
        let _ = element.class_list().add_1("obstacle");
        let Ok(element) = element.dyn_into::<HtmlElement>() else {
            return;
        };
        let _ = element
            .style()
            .set_property("left", &format!("{x_percent}%"));
        let _ = element
            .style()
            .set_property("top", &format!("{OBSTACLE_SPAWN_Y}px"));
        let _ = self.game_area.append_child(&element);
        self.obstacle_nodes.insert(id, element);
    }

    fn set_obstacle_position(&mut self, id: ObstacleId, y_px: f32) {
        if let Some(element) = self.obstacle_nodes.get(&id) {
            let _ = element.style().set_property("top", &format!("{y_px}px"));
        }
    }

    fn remove_obstacle_visual(&mut self, id: ObstacleId) {
        if let Some(element) = self.obstacle_nodes.remove(&id) {
            element.remove();
        }
    }

    fn set_pause_label(&mut self, paused: bool) {
        let label = if paused { "Resume" } else { "Pause" };
        self.pause_button.set_text_content(Some(label));
    }

    fn set_mute_label(&mut self, muted: bool) {
        let label = if muted { "\u{1F507}" } else { "\u{1F50A}" };
        self.mute_button.set_text_content(Some(label));
    }

    fn play_music(&mut self) {
        // Autoplay policies can reject this; the game plays on silently
        let _ = self.background_music.play();
    }

    fn pause_music(&mut self) {
        let _ = self.background_music.pause();
    }

    fn rewind_music(&mut self) {
        self.background_music.set_current_time(0.0);
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.background_music.set_volume(f64::from(volume));
    }

    fn play_collision_sound(&mut self) {
        let _ = self.collision_sound.play();
    }

    fn duck_background_music(&mut self) {
        self.background_music.set_volume(f64::from(DUCK_VOLUME));

        let music = self.background_music.clone();
        let restore = Closure::once(move || {
            music.set_volume(f64::from(MUSIC_VOLUME));
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                restore.as_ref().unchecked_ref(),
                DUCK_RESTORE_DELAY_MS,
            );
        }
        restore.forget();
    }
}
