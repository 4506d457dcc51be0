//! Line interpreter for `.script` files
//!
//! A line is one of:
//! - blank, or a `#` comment
//! - an assignment `name = expr`
//! - a statement: `move`, `setPos`, `setColor`, `createCircle`, `createRect`,
//!   `log "text"`, or `for` (recognised, never looped)
//!
//! Numeric arguments are expressions without spaces (`speed*2`, `sin(angle)`),
//! so unlike the command bar, scripts can use variables anywhere.

use super::{ScriptLibrary, evaluate};
use crate::scene::{Rgba, Shape, Vec2};
use crate::world::World;

/// Longest line the interpreter accepts, in bytes
pub const MAX_LINE_LEN: usize = 256;

pub fn execute_line(world: &mut World, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return;
    }
    if line.len() > MAX_LINE_LEN {
        world.console.warn(format!(
            "[Script] line too long ({} bytes, max {}), skipped",
            line.len(),
            MAX_LINE_LEN
        ));
        return;
    }

    if let Some((lhs, rhs)) = line.split_once('=') {
        assign(world, lhs, rhs);
        return;
    }

    let mut tokens = line.split_whitespace();
    let Some(verb) = tokens.next() else {
        return;
    };
    let args: Vec<&str> = tokens.collect();

    match verb {
        "move" => {
            if let [name, dx, dy, ..] = args[..] {
                let delta = Vec2::new(eval(world, dx), eval(world, dy));
                with_object(world, name, |obj| obj.position += delta);
            }
        }
        "setPos" => {
            if let [name, x, y, ..] = args[..] {
                let pos = Vec2::new(eval(world, x), eval(world, y));
                with_object(world, name, |obj| obj.position = pos);
            }
        }
        "setColor" => {
            if let [name, r, g, b, ..] = args[..] {
                let color = Rgba::from_channels(eval(world, r), eval(world, g), eval(world, b));
                with_object(world, name, |obj| obj.color = color);
            }
        }
        "createCircle" => create(world, Shape::Circle, &args),
        "createRect" => create(world, Shape::Rect, &args),
        "log" => {
            if let Some(text) = first_quoted(line) {
                world.console.info(format!("[Script] {}", text));
            }
        }
        "for" => world.console.info("[Script] For loop detected"),
        other => log::debug!("ignoring script statement '{}'", other),
    }
}

/// Run the named library script line by line. Returns false if it is not loaded.
pub fn execute_script(world: &mut World, library: &ScriptLibrary, name: &str) -> bool {
    let Some(script) = library.find(name) else {
        world.console.error(format!("Script '{}' not found", name));
        return false;
    };

    execute_lines(world, script.lines.iter().map(String::as_str));
    world.console.info(format!("Executed script '{}'", name));
    true
}

/// Run every line in order; a bad line never stops the rest
pub fn execute_lines<'a>(world: &mut World, lines: impl IntoIterator<Item = &'a str>) {
    for line in lines {
        execute_line(world, line);
    }
}

fn eval(world: &World, expr: &str) -> f32 {
    evaluate(expr, &world.variables)
}

fn assign(world: &mut World, lhs: &str, rhs: &str) {
    let Some(name) = lhs.split_whitespace().next() else {
        return;
    };
    let value = eval(world, rhs);
    world.set_variable(name, value);
    world.console.info(format!("[Script] {} = {:.2}", name, value));
}

fn with_object(world: &mut World, name: &str, f: impl FnOnce(&mut crate::scene::GameObject)) {
    match world.scene.find_mut(name) {
        Some(obj) => f(obj),
        None => world.console.warn(format!("[Script] '{}' not found", name)),
    }
}

fn create(world: &mut World, shape: Shape, args: &[&str]) {
    let [name, x, y, size, r, g, b, ..] = args[..] else {
        return;
    };
    let pos = Vec2::new(eval(world, x), eval(world, y));
    let size = eval(world, size);
    let color = Rgba::from_channels(eval(world, r), eval(world, g), eval(world, b));

    match world.scene.add(name, shape, pos, size, color) {
        Ok(_) => world.console.info(format!("Added {} '{}'", shape, name)),
        Err(e) => world.console.error(format!("Error: {}", e)),
    }
}

fn first_quoted(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::script::Script;

    fn world_with_box() -> World {
        let mut world = World::new(&Settings::default());
        world
            .scene
            .add("box", Shape::Rect, Vec2::new(700.0, 350.0), 50.0, Rgba::BLUE)
            .unwrap();
        world
    }

    fn position(world: &World, name: &str) -> Vec2 {
        world.scene.find(name).unwrap().position
    }

    #[test]
    fn blank_and_comment_lines_do_nothing() {
        let mut world = world_with_box();
        execute_line(&mut world, "");
        execute_line(&mut world, "   ");
        execute_line(&mut world, "# move box 10 10");
        assert_eq!(position(&world, "box"), Vec2::new(700.0, 350.0));
        assert!(world.console.is_empty());
    }

    #[test]
    fn assignment_evaluates_right_side() {
        let mut world = world_with_box();
        execute_line(&mut world, "x = 2+3*4");
        assert_eq!(world.variables.get("x"), 14.0);
        assert_eq!(world.console.last(), Some("[Script] x = 14.00"));
    }

    #[test]
    fn overlong_line_is_skipped_with_a_warning() {
        let mut world = world_with_box();
        let line = format!("x = {}", vec!["1"; 200_000].join("+"));
        execute_line(&mut world, &line);
        assert_eq!(world.variables.get("x"), 0.0);
        assert!(world.variables.is_empty());
        assert!(world.console.last().unwrap().contains("line too long"));

        // Later lines still run
        execute_line(&mut world, "x = 1+1");
        assert_eq!(world.variables.get("x"), 2.0);
    }

    #[test]
    fn assignment_uses_first_token_as_name() {
        let mut world = world_with_box();
        execute_line(&mut world, "  speed extra = 3");
        assert_eq!(world.variables.get("speed"), 3.0);
    }

    #[test]
    fn variable_then_move() {
        let mut world = world_with_box();
        execute_lines(&mut world, "x = 5\nmove box x 0".lines());
        assert_eq!(position(&world, "box"), Vec2::new(705.0, 350.0));
    }

    #[test]
    fn set_pos_and_set_color_use_expressions() {
        let mut world = world_with_box();
        world.set_variable("half", 50.0);
        execute_line(&mut world, "setPos box half*2 half");
        execute_line(&mut world, "setColor box 255 half 0");
        let obj = world.scene.find("box").unwrap();
        assert_eq!(obj.position, Vec2::new(100.0, 50.0));
        assert_eq!(obj.color, Rgba::opaque(255, 50, 0));
    }

    #[test]
    fn create_statements_add_objects() {
        let mut world = World::new(&Settings::default());
        execute_line(&mut world, "createCircle ball 10 20 0 255 0 0");
        execute_line(&mut world, "createRect wall 1 2 30 0 0 255");
        let ball = world.scene.find("ball").unwrap();
        assert_eq!(ball.shape, Shape::Circle);
        assert_eq!(ball.size, 1.0);
        assert_eq!(world.scene.find("wall").unwrap().shape, Shape::Rect);
        assert_eq!(world.console.last(), Some("Added rect 'wall'"));
    }

    #[test]
    fn create_with_taken_name_logs_error() {
        let mut world = world_with_box();
        execute_line(&mut world, "createRect box 0 0 10 0 0 0");
        assert_eq!(world.scene.len(), 1);
        assert_eq!(world.console.last(), Some("Error: name 'box' exists"));
    }

    #[test]
    fn short_statements_are_ignored() {
        let mut world = world_with_box();
        execute_line(&mut world, "move box 10");
        execute_line(&mut world, "createCircle c 1 2 3");
        assert_eq!(position(&world, "box"), Vec2::new(700.0, 350.0));
        assert_eq!(world.scene.len(), 1);
    }

    #[test]
    fn log_prints_first_quoted_text() {
        let mut world = World::default();
        execute_line(&mut world, r#"log "hello there" "ignored""#);
        assert_eq!(world.console.last(), Some("[Script] hello there"));
        execute_line(&mut world, "log unquoted");
        assert_eq!(world.console.len(), 1);
    }

    #[test]
    fn for_is_only_detected() {
        let mut world = World::default();
        execute_line(&mut world, "for i 0 10");
        assert_eq!(world.console.last(), Some("[Script] For loop detected"));
    }

    #[test]
    fn execute_script_runs_every_line() {
        let mut world = world_with_box();
        let mut library = ScriptLibrary::new(4);
        library
            .insert(Script::from_text(
                "walk.script",
                "step = 5\nmove ghost step 0\nmove box step step\nmove box step 0",
            ))
            .unwrap();

        assert!(execute_script(&mut world, &library, "walk.script"));
        assert_eq!(position(&world, "box"), Vec2::new(710.0, 355.0));
        assert_eq!(world.console.last(), Some("Executed script 'walk.script'"));
    }

    #[test]
    fn execute_script_reports_missing_script() {
        let mut world = World::default();
        let library = ScriptLibrary::new(4);
        assert!(!execute_script(&mut world, &library, "nope.script"));
        assert_eq!(world.console.last(), Some("Script 'nope.script' not found"));
    }
}
