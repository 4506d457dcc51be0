//! The verb table
//!
//! Arguments are literal numbers. Expressions belong to the script
//! mini-language, not the command bar.

use super::CommandError;
use crate::scene::{Rgba, Shape, Vec2};
use crate::script::{COMMAND_SCRIPT_EXT, EMBEDDED_SCRIPT_EXT, with_extension};
use crate::session::Session;

pub type Handler = fn(&mut Session, &[&str]) -> Result<(), CommandError>;

pub struct Verb {
    pub name: &'static str,
    /// Minimum number of arguments
    pub arity: usize,
    pub usage: &'static str,
    /// The first argument names a script
    pub takes_script: bool,
    pub run: Handler,
}

pub const VERBS: &[Verb] = &[
    Verb {
        name: "addCircle",
        arity: 7,
        usage: "addCircle name x y size r g b",
        takes_script: false,
        run: add_circle,
    },
    Verb {
        name: "addRect",
        arity: 7,
        usage: "addRect name x y size r g b",
        takes_script: false,
        run: add_rect,
    },
    Verb {
        name: "move",
        arity: 3,
        usage: "move name dx dy",
        takes_script: false,
        run: move_object,
    },
    Verb {
        name: "setPos",
        arity: 3,
        usage: "setPos name x y",
        takes_script: false,
        run: set_position,
    },
    Verb {
        name: "color",
        arity: 4,
        usage: "color name r g b",
        takes_script: false,
        run: set_color,
    },
    Verb {
        name: "delete",
        arity: 1,
        usage: "delete name",
        takes_script: false,
        run: delete,
    },
    Verb {
        name: "set",
        arity: 2,
        usage: "set varName value",
        takes_script: false,
        run: set_variable,
    },
    Verb {
        name: "log",
        arity: 1,
        usage: "log text",
        takes_script: false,
        run: log_text,
    },
    Verb {
        name: "OpenScript",
        arity: 1,
        usage: "OpenScript <script>",
        takes_script: true,
        run: open_script,
    },
    Verb {
        name: "NewScript",
        arity: 1,
        usage: "NewScript <name>",
        takes_script: false,
        run: new_script,
    },
    Verb {
        name: "NewPython",
        arity: 1,
        usage: "NewPython <name>",
        takes_script: false,
        run: new_embedded,
    },
    Verb {
        name: "RunScript",
        arity: 1,
        usage: "RunScript <script>",
        takes_script: true,
        run: run_script,
    },
    Verb {
        name: "RunPython",
        arity: 1,
        usage: "RunPython <script>",
        takes_script: true,
        run: run_embedded,
    },
    Verb {
        name: "update",
        arity: 1,
        usage: "update <project>",
        takes_script: false,
        run: update,
    },
    Verb {
        name: "run",
        arity: 0,
        usage: "run",
        takes_script: false,
        run: toggle_run,
    },
    Verb {
        name: "vars",
        arity: 0,
        usage: "vars",
        takes_script: false,
        run: list_variables,
    },
    Verb {
        name: "list",
        arity: 0,
        usage: "list",
        takes_script: false,
        run: list_objects,
    },
];

pub fn find(word: &str) -> Option<&'static Verb> {
    VERBS.iter().find(|v| v.name == word)
}

/// A literal, finite number
fn number(arg: &str) -> Result<f32, CommandError> {
    arg.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(CommandError::Usage)
}

fn color(r: &str, g: &str, b: &str) -> Result<Rgba, CommandError> {
    Ok(Rgba::from_channels(number(r)?, number(g)?, number(b)?))
}

fn add_circle(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    add_shape(session, args, Shape::Circle)
}

fn add_rect(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    add_shape(session, args, Shape::Rect)
}

fn add_shape(session: &mut Session, args: &[&str], shape: Shape) -> Result<(), CommandError> {
    let &[name, x, y, size, r, g, b, ..] = args else {
        return Err(CommandError::Usage);
    };
    let position = Vec2::new(number(x)?, number(y)?);
    let size = number(size)?;
    let color = color(r, g, b)?;

    session
        .world
        .scene
        .add(name, shape, position, size, color)?;
    session
        .world
        .console
        .info(format!("Added {} '{}'", shape, name));
    Ok(())
}

fn move_object(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    let &[name, dx, dy, ..] = args else {
        return Err(CommandError::Usage);
    };
    let delta = Vec2::new(number(dx)?, number(dy)?);

    let object = session
        .world
        .scene
        .find_mut(name)
        .ok_or_else(|| CommandError::NotFound(name.to_string()))?;
    object.position += delta;
    session.world.console.info(format!("Moved '{}'", name));
    Ok(())
}

fn set_position(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    let &[name, x, y, ..] = args else {
        return Err(CommandError::Usage);
    };
    let position = Vec2::new(number(x)?, number(y)?);

    let object = session
        .world
        .scene
        .find_mut(name)
        .ok_or_else(|| CommandError::NotFound(name.to_string()))?;
    object.position = position;
    session.world.console.info(format!(
        "Placed '{}' at ({}, {})",
        name, position.x, position.y
    ));
    Ok(())
}

fn set_color(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    let &[name, r, g, b, ..] = args else {
        return Err(CommandError::Usage);
    };
    let color = color(r, g, b)?;

    let object = session
        .world
        .scene
        .find_mut(name)
        .ok_or_else(|| CommandError::NotFound(name.to_string()))?;
    object.color = color;
    session.world.console.info(format!("Recolored '{}'", name));
    Ok(())
}

fn delete(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    let name = args[0];
    session.world.scene.delete(name)?;
    session.world.console.info(format!("Deleted '{}'", name));
    Ok(())
}

fn set_variable(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    let name = args[0];
    let value = number(args[1])?;
    session.world.set_variable(name, value);
    session
        .world
        .console
        .info(format!("Set {} = {:.2}", name, value));
    Ok(())
}

fn log_text(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    session.world.console.info(args.join(" "));
    Ok(())
}

fn open_script(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    session.open_editor(args[0])?;
    Ok(())
}

fn new_script(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    session.open_editor(&with_extension(args[0], COMMAND_SCRIPT_EXT))?;
    Ok(())
}

fn new_embedded(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    session.open_editor(&with_extension(args[0], EMBEDDED_SCRIPT_EXT))?;
    Ok(())
}

fn run_script(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    session.run_script(args[0]);
    Ok(())
}

fn run_embedded(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    session.run_embedded(args[0])
}

fn update(session: &mut Session, args: &[&str]) -> Result<(), CommandError> {
    session.save_project_as(args[0])?;
    Ok(())
}

fn toggle_run(session: &mut Session, _args: &[&str]) -> Result<(), CommandError> {
    session.toggle_running();
    Ok(())
}

fn list_variables(session: &mut Session, _args: &[&str]) -> Result<(), CommandError> {
    let world = &mut session.world;
    if world.variables.is_empty() {
        world.console.info("No variables");
        return Ok(());
    }
    let lines: Vec<String> = world
        .variables
        .iter()
        .map(|(name, value)| format!("{} = {:.2}", name, value))
        .collect();
    for line in lines {
        world.console.info(line);
    }
    Ok(())
}

fn list_objects(session: &mut Session, _args: &[&str]) -> Result<(), CommandError> {
    let world = &mut session.world;
    if world.scene.is_empty() {
        world.console.info("Scene is empty");
        return Ok(());
    }
    let lines: Vec<String> = world
        .scene
        .iter()
        .map(|o| {
            format!(
                "{} '{}' at ({}, {}) size {}",
                o.shape, o.name, o.position.x, o.position.y, o.size
            )
        })
        .collect();
    for line in lines {
        world.console.info(line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_names_are_unique() {
        for (i, verb) in VERBS.iter().enumerate() {
            assert!(VERBS[i + 1..].iter().all(|v| v.name != verb.name));
        }
    }

    #[test]
    fn usage_starts_with_verb_name() {
        for verb in VERBS {
            assert!(verb.usage.starts_with(verb.name), "{}", verb.name);
        }
    }

    #[test]
    fn number_rejects_non_finite_and_text() {
        assert_eq!(number("2.5").unwrap(), 2.5);
        assert_eq!(number("-3").unwrap(), -3.0);
        assert!(number("inf").is_err());
        assert!(number("NaN").is_err());
        assert!(number("x").is_err());
    }
}
