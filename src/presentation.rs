//! Presentation capability boundary
//!
//! The simulation reports what happened as [`SessionEvent`]s; this module
//! translates them into calls on a [`Presentation`] implementation. The web
//! adapter lives in [`crate::dom`]; tests drive a recording mock instead, so
//! the whole mapping is checkable without a browser.

use crate::consts::MUSIC_VOLUME;
use crate::sim::{GamePhase, GameSession, ObstacleId, SessionEvent};

/// Top-level screens, shown one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
}

/// Everything the game needs from a host surface.
///
/// All methods are infallible from the caller's side; hosts swallow their
/// own failures (autoplay rejection and the like).
pub trait Presentation {
    fn show_screen(&mut self, screen: Screen);
    fn set_score(&mut self, score: u64);
    fn set_lives(&mut self, lives: u8);
    fn set_final_score(&mut self, score: u64);
    fn set_player_position(&mut self, x_percent: f32);

    fn create_obstacle_visual(&mut self, id: ObstacleId, x_percent: f32);
    fn set_obstacle_position(&mut self, id: ObstacleId, y_px: f32);
    fn remove_obstacle_visual(&mut self, id: ObstacleId);

    fn set_pause_label(&mut self, paused: bool);
    fn set_mute_label(&mut self, muted: bool);

    fn play_music(&mut self);
    fn pause_music(&mut self);
    fn rewind_music(&mut self);
    fn set_music_volume(&mut self, volume: f32);
    fn play_collision_sound(&mut self);
    /// Dip the music under the collision sound, restoring after a moment
    fn duck_background_music(&mut self);
}

/// Translate a batch of session events into presentation calls.
///
/// `session` is the state after the events were produced; audio gating
/// reads the current mute flag and phase from it.
pub fn apply_events(
    session: &GameSession,
    events: &[SessionEvent],
    presentation: &mut impl Presentation,
) {
    for event in events {
        match event {
            SessionEvent::Started => {
                presentation.show_screen(Screen::Playing);
                presentation.set_score(session.score);
                presentation.set_lives(session.lives);
                presentation.set_player_position(session.player_position);
                presentation.set_pause_label(false);
                presentation.set_music_volume(MUSIC_VOLUME);
                if !session.muted {
                    presentation.play_music();
                }
            }
            SessionEvent::PauseChanged { paused } => {
                presentation.set_pause_label(*paused);
                if *paused {
                    presentation.pause_music();
                } else if !session.muted {
                    presentation.play_music();
                }
            }
            SessionEvent::MuteChanged { muted } => {
                presentation.set_mute_label(*muted);
                if *muted {
                    presentation.pause_music();
                } else if session.phase == GamePhase::Playing {
                    // Unmuting elsewhere stays silent until play resumes
                    presentation.play_music();
                    presentation.set_music_volume(MUSIC_VOLUME);
                }
            }
            SessionEvent::ObstacleSpawned { id, x_percent } => {
                presentation.create_obstacle_visual(*id, *x_percent);
            }
            SessionEvent::ObstacleRemoved { id } => {
                presentation.remove_obstacle_visual(*id);
            }
            SessionEvent::Collision { lives_left, .. } => {
                // The paired ObstacleRemoved event handles the visual
                presentation.set_lives(*lives_left);
                if !session.muted {
                    presentation.duck_background_music();
                    presentation.play_collision_sound();
                }
            }
            SessionEvent::SpeedIncreased { .. } | SessionEvent::SpawnIntervalDecreased { .. } => {
                // Difficulty is invisible until obstacles move faster
            }
            SessionEvent::GameOver { final_score } => {
                presentation.pause_music();
                presentation.rewind_music();
                presentation.show_screen(Screen::GameOver);
                presentation.set_final_score(*final_score);
            }
        }
    }
}

/// Push the per-frame view of the session: player, obstacle positions, HUD.
pub fn sync_frame(session: &GameSession, presentation: &mut impl Presentation) {
    presentation.set_player_position(session.player_position);
    for obstacle in &session.obstacles {
        presentation.set_obstacle_position(obstacle.id, obstacle.y_px);
    }
    presentation.set_score(session.score);
    presentation.set_lives(session.lives);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Command, handle_command, tick};

    /// Records every capability call as a compact string
    #[derive(Default)]
    struct RecordingPresentation {
        calls: Vec<String>,
    }

    impl RecordingPresentation {
        fn log(&mut self, call: impl Into<String>) {
            self.calls.push(call.into());
        }
    }

    impl Presentation for RecordingPresentation {
        fn show_screen(&mut self, screen: Screen) {
            self.log(format!("show({screen:?})"));
        }
        fn set_score(&mut self, score: u64) {
            self.log(format!("score({score})"));
        }
        fn set_lives(&mut self, lives: u8) {
            self.log(format!("lives({lives})"));
        }
        fn set_final_score(&mut self, score: u64) {
            self.log(format!("final_score({score})"));
        }
        fn set_player_position(&mut self, x_percent: f32) {
            self.log(format!("player({x_percent})"));
        }
        fn create_obstacle_visual(&mut self, id: ObstacleId, x_percent: f32) {
            self.log(format!("create({},{x_percent})", id.0));
        }
        fn set_obstacle_position(&mut self, id: ObstacleId, y_px: f32) {
            self.log(format!("move({},{y_px})", id.0));
        }
        fn remove_obstacle_visual(&mut self, id: ObstacleId) {
            self.log(format!("remove({})", id.0));
        }
        fn set_pause_label(&mut self, paused: bool) {
            self.log(format!("pause_label({paused})"));
        }
        fn set_mute_label(&mut self, muted: bool) {
            self.log(format!("mute_label({muted})"));
        }
        fn play_music(&mut self) {
            self.log("music.play");
        }
        fn pause_music(&mut self) {
            self.log("music.pause");
        }
        fn rewind_music(&mut self) {
            self.log("music.rewind");
        }
        fn set_music_volume(&mut self, volume: f32) {
            self.log(format!("music.volume({volume})"));
        }
        fn play_collision_sound(&mut self) {
            self.log("sound.play");
        }
        fn duck_background_music(&mut self) {
            self.log("music.duck");
        }
    }

    fn apply_command(session: &mut GameSession, command: Command) -> RecordingPresentation {
        let events = handle_command(session, command);
        let mut presentation = RecordingPresentation::default();
        apply_events(session, &events, &mut presentation);
        presentation
    }

    #[test]
    fn test_start_shows_game_and_plays_music() {
        let mut session = GameSession::new(1);
        let presentation = apply_command(&mut session, Command::Start);
        assert_eq!(
            presentation.calls,
            vec![
                "show(Playing)",
                "score(0)",
                "lives(3)",
                "player(50)",
                "pause_label(false)",
                "music.volume(0.6)",
                "music.play",
            ]
        );
    }

    #[test]
    fn test_start_while_muted_stays_silent() {
        let mut session = GameSession::new(1);
        handle_command(&mut session, Command::ToggleMute);
        let presentation = apply_command(&mut session, Command::Start);
        assert!(!presentation.calls.iter().any(|c| c == "music.play"));
        // Volume is still primed for a later unmute
        assert!(presentation.calls.iter().any(|c| c == "music.volume(0.6)"));
    }

    #[test]
    fn test_pause_and_resume_drive_label_and_music() {
        let mut session = GameSession::new(1);
        handle_command(&mut session, Command::Start);

        let paused = apply_command(&mut session, Command::TogglePause);
        assert_eq!(paused.calls, vec!["pause_label(true)", "music.pause"]);

        let resumed = apply_command(&mut session, Command::TogglePause);
        assert_eq!(resumed.calls, vec!["pause_label(false)", "music.play"]);
    }

    #[test]
    fn test_resume_while_muted_keeps_music_paused() {
        let mut session = GameSession::new(1);
        handle_command(&mut session, Command::Start);
        handle_command(&mut session, Command::ToggleMute);
        handle_command(&mut session, Command::TogglePause);

        let resumed = apply_command(&mut session, Command::TogglePause);
        assert_eq!(resumed.calls, vec!["pause_label(false)"]);
    }

    #[test]
    fn test_unmute_only_plays_while_playing() {
        let mut session = GameSession::new(1);
        handle_command(&mut session, Command::Start);

        let muted = apply_command(&mut session, Command::ToggleMute);
        assert_eq!(muted.calls, vec!["mute_label(true)", "music.pause"]);

        let unmuted = apply_command(&mut session, Command::ToggleMute);
        assert_eq!(
            unmuted.calls,
            vec!["mute_label(false)", "music.play", "music.volume(0.6)"]
        );

        // On the menu the label flips but nothing plays
        let mut menu_session = GameSession::new(1);
        handle_command(&mut menu_session, Command::ToggleMute);
        let unmuted = apply_command(&mut menu_session, Command::ToggleMute);
        assert_eq!(unmuted.calls, vec!["mute_label(false)"]);
    }

    #[test]
    fn test_collision_audio_is_mute_gated() {
        let mut session = GameSession::new(1);
        handle_command(&mut session, Command::Start);
        let events = vec![
            SessionEvent::Collision {
                id: ObstacleId(4),
                lives_left: 2,
            },
            SessionEvent::ObstacleRemoved { id: ObstacleId(4) },
        ];

        let mut loud = RecordingPresentation::default();
        apply_events(&session, &events, &mut loud);
        assert_eq!(
            loud.calls,
            vec!["lives(2)", "music.duck", "sound.play", "remove(4)"]
        );

        handle_command(&mut session, Command::ToggleMute);
        let mut quiet = RecordingPresentation::default();
        apply_events(&session, &events, &mut quiet);
        assert_eq!(quiet.calls, vec!["lives(2)", "remove(4)"]);
    }

    #[test]
    fn test_spawn_and_removal_manage_visuals() {
        let session = GameSession::new(1);
        let events = vec![
            SessionEvent::ObstacleSpawned {
                id: ObstacleId(7),
                x_percent: 42.5,
            },
            SessionEvent::ObstacleRemoved { id: ObstacleId(7) },
        ];
        let mut presentation = RecordingPresentation::default();
        apply_events(&session, &events, &mut presentation);
        assert_eq!(presentation.calls, vec!["create(7,42.5)", "remove(7)"]);
    }

    #[test]
    fn test_difficulty_events_are_silent() {
        let session = GameSession::new(1);
        let events = vec![
            SessionEvent::SpeedIncreased { game_speed: 1.1 },
            SessionEvent::SpawnIntervalDecreased { interval_ms: 1400.0 },
        ];
        let mut presentation = RecordingPresentation::default();
        apply_events(&session, &events, &mut presentation);
        assert!(presentation.calls.is_empty());
    }

    #[test]
    fn test_game_over_stops_and_rewinds_music() {
        let session = GameSession::new(1);
        let events = vec![SessionEvent::GameOver { final_score: 1234 }];
        let mut presentation = RecordingPresentation::default();
        apply_events(&session, &events, &mut presentation);
        assert_eq!(
            presentation.calls,
            vec![
                "music.pause",
                "music.rewind",
                "show(GameOver)",
                "final_score(1234)",
            ]
        );
    }

    #[test]
    fn test_sync_frame_pushes_view_state() {
        let mut session = GameSession::new(1);
        session.set_viewport(1000.0, 800.0);
        handle_command(&mut session, Command::Start);
        // Run until at least one obstacle is on screen
        while session.obstacles.is_empty() {
            tick(&mut session, 16.0);
        }
        let id = session.obstacles[0].id;
        let y = session.obstacles[0].y_px;

        let mut presentation = RecordingPresentation::default();
        sync_frame(&session, &mut presentation);
        assert_eq!(
            presentation.calls,
            vec![
                "player(50)".to_string(),
                format!("move({},{y})", id.0),
                format!("score({})", session.score),
                "lives(3)".to_string(),
            ]
        );
    }
}
