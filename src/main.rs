//! Hebi entry point
//!
//! The browser build runs the game loop against a WebGPU canvas. The native
//! build is a headless runner: bots play a seeded game and the board is
//! printed as text.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use hebi::audio::{AudioManager, SoundEffect};
    use hebi::colors::to_wgpu;
    use hebi::consts::*;
    use hebi::highscores::{HighScoreEntry, HighScores, relative_age};
    use hebi::input::{KeyAction, map_key};
    use hebi::persistence;
    use hebi::renderer::{RenderState, build_scene};
    use hebi::sim::{Direction, GamePhase, GameState, TickInput, tick};
    use hebi::storage;
    use hebi::theme::Palette;
    use hebi::{GameConfig, Settings, Theme};

    const CONFIG_KEY: &str = "hebi_config";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        config: GameConfig,
        settings: Settings,
        palette: Palette,
        render_state: Option<RenderState>,
        audio: AudioManager,
        high_scores: HighScores,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Queued turns per player slot, one consumed per tick
        pending_turns: [VecDeque<Direction>; MAX_PLAYERS],
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase for save / high score / sounds
        last_phase: GamePhase,
        /// Rank of this game's entry in the high score table
        new_rank: Option<usize>,
    }

    impl Game {
        fn new(config: GameConfig, settings: Settings, seed: u64) -> Self {
            let state = new_state(&config, seed);
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                last_phase: state.phase,
                state,
                config,
                palette: palette_for(&settings),
                settings,
                render_state: None,
                audio,
                high_scores: HighScores::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                pending_turns: Default::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                new_rank: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                for (slot, turns) in self.pending_turns.iter_mut().enumerate() {
                    self.input.directions[slot] = turns.pop_front();
                }
                let input = self.input.clone();
                tick(&mut self.state, &input);
                self.audio.play_events(&self.state.events);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.pause = false;
                self.input.directions = [None; MAX_PLAYERS];

                self.on_phase_change();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn on_phase_change(&mut self) {
            let current = self.state.phase;
            if current == self.last_phase {
                return;
            }
            match (self.last_phase, current) {
                (GamePhase::Ready, GamePhase::Playing) => self.audio.play(SoundEffect::Start),
                (_, GamePhase::Paused) if persistence::worth_saving(&self.state) => {
                    persistence::save_game(&self.state, js_sys::Date::now())
                }
                (_, GamePhase::GameOver) => {
                    persistence::clear_game();
                    self.record_high_score();
                }
                _ => {}
            }
            self.last_phase = current;
        }

        /// Enter the best human result into the high score table
        fn record_high_score(&mut self) {
            let Some(best) = self
                .state
                .snakes
                .iter()
                .filter(|s| s.is_human())
                .max_by_key(|s| s.score)
            else {
                return;
            };
            let entry = HighScoreEntry {
                score: best.score,
                length: best.longest,
                players: self.state.config.players,
                timestamp: js_sys::Date::now(),
            };
            self.new_rank = self.high_scores.record(&self.state.board.name, entry);
            if let Some(rank) = self.new_rank {
                self.high_scores.save();
                self.audio.play(SoundEffect::HighScore);
                log::info!("New high score: {} (rank {})", best.score, rank);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let progress = self.accumulator / SIM_DT;
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state, &self.palette, &self.settings, progress);
                match render_state.render(&vertices, to_wgpu(self.palette.background)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn handle_key(&mut self, action: KeyAction) {
            self.audio.resume();
            match action {
                KeyAction::Steer { slot, direction } => {
                    let turns = &mut self.pending_turns[slot];
                    if turns.len() < TURN_BUFFER {
                        turns.push_back(direction);
                    }
                }
                KeyAction::Start => match self.state.phase {
                    GamePhase::Ready => self.input.start = true,
                    GamePhase::Paused => self.input.pause = true,
                    GamePhase::GameOver => self.restart(js_sys::Date::now() as u64),
                    GamePhase::Playing => {}
                },
                KeyAction::Pause => self.input.pause = true,
                KeyAction::CycleTheme => {
                    self.settings.cycle_theme();
                    self.settings.save();
                    self.palette = palette_for(&self.settings);
                    log::info!("Theme: {}", self.settings.theme().name);
                }
                KeyAction::ToggleIdle => {
                    self.input.idle_mode = !self.input.idle_mode;
                    log::info!("Idle mode: {}", self.input.idle_mode);
                }
                KeyAction::Players(players) => {
                    if !matches!(self.state.phase, GamePhase::Ready | GamePhase::GameOver) {
                        return;
                    }
                    let config = GameConfig {
                        players,
                        ..self.config.clone()
                    };
                    match config.validate() {
                        Ok(()) => {
                            self.config = config;
                            self.restart(js_sys::Date::now() as u64);
                        }
                        Err(e) => log::warn!("Cannot switch to {} players: {}", players, e),
                    }
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-scores") {
                let rows: String = self
                    .state
                    .snakes
                    .iter()
                    .map(|snake| {
                        let lives = snake
                            .lives
                            .map_or_else(|| "∞".to_string(), |l| l.to_string());
                        let name = match snake.controller {
                            hebi::sim::Controller::Human(slot) => format!("P{}", slot + 1),
                            hebi::sim::Controller::Bot => "BOT".to_string(),
                        };
                        let color = self.palette.snake(snake.id);
                        format!(
                            "<div class=\"hud-item{}\" style=\"color: rgb({}, {}, {})\">\
                             <span class=\"hud-label\">{}</span>\
                             <span class=\"hud-value\">{}</span>\
                             <span class=\"hud-lives\">{}</span></div>",
                            if snake.is_out() { " out" } else { "" },
                            (color[0] * 255.0) as u8,
                            (color[1] * 255.0) as u8,
                            (color[2] * 255.0) as u8,
                            name,
                            snake.score,
                            lives
                        )
                    })
                    .collect();
                el.set_inner_html(&rows);
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-idle") {
                let class = if self.input.idle_mode { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            show(&document, "ready-prompt", self.state.phase == GamePhase::Ready);
            show(&document, "pause-menu", self.state.phase == GamePhase::Paused);

            let over = self.state.phase == GamePhase::GameOver;
            show(&document, "game-over", over);
            if over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.human_score().to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-rank") {
                    let text = self
                        .new_rank
                        .map(|rank| format!("New high score! #{}", rank))
                        .unwrap_or_default();
                    el.set_text_content(Some(&text));
                }
                if let Some(el) = document.get_element_by_id("best-score") {
                    let best = self.high_scores.best(&self.state.board.name).unwrap_or(0);
                    el.set_text_content(Some(&best.to_string()));
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            persistence::clear_game();
            self.load_state(new_state(&self.config, seed));
            log::info!("Game restarted with seed: {}", seed);
        }

        /// Swap in a new or restored game
        fn load_state(&mut self, state: GameState) {
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.set_board(state.board.width, state.board.height);
            }
            self.last_phase = state.phase;
            self.state = state;
            self.accumulator = 0.0;
            self.input = TickInput {
                idle_mode: self.input.idle_mode,
                ..TickInput::default()
            };
            self.pending_turns = Default::default();
            self.new_rank = None;
        }
    }

    fn show(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Build a game, falling back to the default rules if the config is unusable
    fn new_state(config: &GameConfig, seed: u64) -> GameState {
        GameState::new(config.clone(), seed).unwrap_or_else(|e| {
            log::error!("Invalid game config ({}), using defaults", e);
            GameState::new(GameConfig::default(), seed).expect("default config is valid")
        })
    }

    fn palette_for(settings: &Settings) -> Palette {
        settings.theme().palette().unwrap_or_else(|e| {
            log::error!("Theme colours invalid ({}), using default theme", e);
            Theme::default().palette().expect("built-in theme parses")
        })
    }

    /// Rules from LocalStorage, if the page stored any
    fn load_config() -> GameConfig {
        match storage::read(CONFIG_KEY).map(|j| GameConfig::from_json(&j)) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Ignoring stored game config: {}", e);
                GameConfig::default()
            }
            None => GameConfig::default(),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hebi starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = fit_canvas(&canvas);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(load_config(), Settings::load(), seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        {
            let mut g = game.borrow_mut();
            render_state.set_board(g.state.board.width, g.state.board.height);
            g.render_state = Some(render_state);
        }

        // Check for saved game
        let saved_game = persistence::load_game();
        let has_save = saved_game.is_some();

        if let Some(ref save) = saved_game {
            show(&document, "continue-prompt", true);
            if let Some(el) = document.get_element_by_id("continue-score") {
                el.set_text_content(Some(&save.state.human_score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("continue-date") {
                el.set_text_content(Some(&relative_age(js_sys::Date::now(), save.saved_at)));
            }
            log::info!("Found saved game at tick {}", save.state.time_ticks);
        }

        setup_input_handlers(game.clone());
        setup_resize(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_pause_menu(game.clone());
        setup_continue_prompt(game.clone(), saved_game.map(|s| s.state));
        setup_auto_pause(game.clone());

        // Show HUD (unless we're showing continue prompt)
        if !has_save {
            show(&document, "hud", true);
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Hebi running!");
    }

    /// Size the canvas backing store to its CSS size times the pixel ratio
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.repeat() {
                return;
            }
            if let Some(action) = map_key(&event.key(), &event.code()) {
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                game.borrow_mut().handle_key(action);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&canvas);
            if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn on_click(id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            return;
        };
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        on_click("restart-btn", move |_| {
            game.borrow_mut().restart(js_sys::Date::now() as u64);
        });
    }

    fn setup_pause_menu(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("resume-btn", move |_| {
                game.borrow_mut().input.pause = true; // Toggle back to playing
            });
        }

        on_click("save-quit-btn", move |_| {
            persistence::save_game(&game.borrow().state, js_sys::Date::now());
            // Reload page to show continue prompt
            if let Some(window) = web_sys::window() {
                let _ = window.location().reload();
            }
        });
    }

    fn leave_continue_prompt() {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            show(&document, "continue-prompt", false);
            show(&document, "hud", true);
        }
    }

    fn setup_continue_prompt(game: Rc<RefCell<Game>>, saved: Option<GameState>) {
        {
            let game = game.clone();
            on_click("continue-btn", move |_| {
                if let Some(ref state) = saved {
                    let mut g = game.borrow_mut();
                    g.config = state.config.clone();
                    g.load_state(state.clone());
                    log::info!("Loaded saved game at tick {}", state.time_ticks);
                }
                leave_continue_prompt();
            });
        }

        on_click("new-game-btn", move |_| {
            game.borrow_mut().restart(js_sys::Date::now() as u64);
            leave_continue_prompt();
        });
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        fn suspend(g: &mut Game, why: &str) {
            if matches!(g.state.phase, GamePhase::Playing) {
                g.input.pause = true;
                log::info!("Auto-paused ({})", why);
            }
            if g.settings.mute_on_blur {
                g.audio.set_muted(true);
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    suspend(&mut g, "tab hidden");
                } else {
                    g.audio.set_muted(false);
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                suspend(&mut game.borrow_mut(), "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use hebi::renderer::render_text;
    use hebi::sim::{GamePhase, GameState, TickInput, tick};
    use hebi::theme::Palette;
    use hebi::{ConfigError, GameConfig, Theme};

    /// Play a seeded game with AI snakes and print the board
    #[derive(Parser, Debug)]
    #[command(name = "hebi", version, about)]
    pub struct Args {
        /// JSON game config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// RNG seed (defaults to the current time)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Stop after this many ticks (120 per second)
        #[arg(short, long, default_value_t = 7200)]
        ticks: u64,
        /// Override the number of bot snakes
        #[arg(short, long)]
        bots: Option<u8>,
        /// Colour the board with a theme (dracula, nord, gruvbox, ...)
        #[arg(long)]
        theme: Option<String>,
        /// Also print the board every N ticks
        #[arg(long)]
        every: Option<u64>,
    }

    pub fn run(args: Args) -> Result<(), ConfigError> {
        let mut config = match &args.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(bots) = args.bots {
            config.bots = bots;
        }
        config.validate()?;

        let palette = match args.theme.as_deref() {
            Some(name) => match Theme::by_name(name).map(|t| t.palette()) {
                Some(Ok(palette)) => Some(palette),
                Some(Err(e)) => {
                    log::error!("Theme '{}' has invalid colours: {}", name, e);
                    None
                }
                None => {
                    log::warn!("Unknown theme '{}', printing without colour", name);
                    None
                }
            },
            None => None,
        };

        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let mut state = GameState::new(config, seed)?;

        // The first human is driven by the AI, as in the browser's idle mode
        let input = TickInput {
            start: true,
            idle_mode: true,
            ..TickInput::default()
        };
        while state.time_ticks < args.ticks && state.phase != GamePhase::GameOver {
            tick(&mut state, &input);
            for event in &state.events {
                log::debug!("tick {}: {:?}", state.time_ticks, event);
            }
            if let Some(every) = args.every.filter(|&n| n > 0) {
                if state.time_ticks % every == 0 {
                    print(&state, palette.as_ref());
                }
            }
        }

        print(&state, palette.as_ref());
        log::info!(
            "Finished after {} ticks: {:?}, best score {}",
            state.time_ticks,
            state.phase,
            state.best_score()
        );
        Ok(())
    }

    fn print(state: &GameState, palette: Option<&Palette>) {
        let text = render_text(state);
        match palette {
            Some(palette) => println!("{}", colorize(&text, palette, state.board.height as usize)),
            None => println!("{}", text),
        }
    }

    fn ansi(color: [f32; 4]) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("\x1b[38;2;{};{};{}m", c(color[0]), c(color[1]), c(color[2]))
    }

    /// Colour the board lines of a text dump with 24-bit ANSI escapes
    pub fn colorize(text: &str, palette: &Palette, board_rows: usize) -> String {
        let mut out = String::with_capacity(text.len() * 4);
        for (row, line) in text.lines().enumerate() {
            if row >= board_rows {
                out.push_str(line);
                out.push('\n');
                continue;
            }
            for c in line.chars() {
                let color = match c {
                    '#' => Some(palette.wall),
                    '.' => Some(palette.grid_line),
                    '*' => Some(palette.food),
                    '$' => Some(palette.golden_food),
                    '>' | '<' | '?' | '-' | '+' => Some(palette.powerup),
                    '0'..='9' => Some(palette.portal),
                    c if c.is_ascii_alphabetic() => {
                        Some(palette.snake((c.to_ascii_lowercase() as u8 - b'a') as u32))
                    }
                    _ => None,
                };
                match color {
                    Some(color) => {
                        out.push_str(&ansi(color));
                        out.push(c);
                        out.push_str("\x1b[0m");
                    }
                    None => out.push(c),
                }
            }
            out.push('\n');
        }
        out
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Hebi (native, headless) starting...");

    let args = headless::Args::parse();
    if let Err(e) = headless::run(args) {
        log::error!("{}", e);
        eprintln!("hebi: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
