// Hotbind Terminal Driver
// Loads a bindings file and fires its actions from terminal key releases

use std::cell::Cell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};

use hotbind_core::config::default_config_content;
use hotbind_core::{
    bind, host, BindingsConfig, Element, EventKind, Handler, KeyboardEvent, ModifierState,
    TargetHandle,
};

/// Keyboard shortcut binder for the terminal
#[derive(Parser, Debug)]
#[command(name = "hotbind")]
#[command(version)]
#[command(about = "Fire named actions from keyboard shortcuts", long_about = None)]
struct Args {
    /// TOML bindings file (defaults to ~/.config/hotbind/bindings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Validate bindings and exit
    #[arg(long)]
    check_config: bool,

    /// Print a starter bindings file and exit
    #[arg(long)]
    print_default_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<BindingsConfig> {
    match &args.config {
        Some(path) => BindingsConfig::from_file(path)
            .with_context(|| format!("failed to load bindings from {}", path.display())),
        None => BindingsConfig::load_default().context("failed to load default bindings"),
    }
}

fn check_config(config: &BindingsConfig) -> anyhow::Result<()> {
    let errors = config.validate();
    for error in &errors {
        eprintln!("{}", error);
    }
    if !errors.is_empty() {
        bail!("{} binding(s) can never fire", errors.len());
    }
    println!("Bindings are valid ({} binding(s))", config.bindings.len());
    Ok(())
}

/// DOM-style key identifier for a terminal key code
fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => return None,
    };
    Some(name)
}

/// Convert a crossterm key event; `releases` says whether the terminal
/// reports key releases at all
fn to_keyboard_event(key: &KeyEvent, releases: bool) -> Option<KeyboardEvent> {
    let kind = match key.kind {
        KeyEventKind::Release => EventKind::KeyUp,
        KeyEventKind::Press if !releases => EventKind::KeyUp,
        KeyEventKind::Press | KeyEventKind::Repeat => EventKind::KeyDown,
    };
    let modifiers = ModifierState {
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift: key.modifiers.contains(KeyModifiers::SHIFT) || key.code == KeyCode::BackTab,
        meta: key.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    };
    Some(KeyboardEvent::new(kind, key_name(key.code)?).with_modifiers(modifiers))
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Raw-mode terminal restored on drop
struct RawTerminal {
    enhanced: bool,
}

impl RawTerminal {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }
        Ok(Self { enhanced })
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
    }
}

fn run(config: &BindingsConfig) -> anyhow::Result<()> {
    let window = Rc::new(Element::window());
    let window_handle: TargetHandle = window.clone();
    host::set_window(window_handle);

    let quit = Rc::new(Cell::new(false));
    let mut handlers = config.handler_map(|action| {
        let action = action.to_string();
        let handler: Handler = Rc::new(move |event: &KeyboardEvent| {
            print!("{} ({})\r\n", action, event.combo_string());
            let _ = io::stdout().flush();
        });
        handler
    });
    if !handlers.contains("q") {
        let quit = Rc::clone(&quit);
        handlers.insert("q", move |_| quit.set(true));
    }

    let binder = bind(handlers, config.binding_options(None));
    if !binder.is_attached() {
        println!("Bindings are disabled, nothing to do");
        return Ok(());
    }

    let term = RawTerminal::enter().context("failed to enter raw mode")?;
    if !term.enhanced {
        log::warn!("terminal does not report key releases, treating presses as releases");
    }
    print!(
        "Listening for {} binding(s). Release q or press ctrl+c to quit.\r\n",
        config.bindings.len()
    );
    io::stdout().flush()?;

    while !quit.get() {
        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if is_interrupt(&key) {
            break;
        }
        let Some(keyboard_event) = to_keyboard_event(&key, term.enhanced) else {
            log::trace!("ignoring unmapped key {:?}", key.code);
            continue;
        };
        window.dispatch(&keyboard_event);
    }

    drop(binder);
    host::clear_window();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.print_default_config {
        print!("{}", default_config_content());
        return Ok(());
    }

    let config = load_config(&args)?;

    if args.check_config {
        return check_config(&config);
    }

    run(&config)
}
