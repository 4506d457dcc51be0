//! Scene API for Rhai scripts
//!
//! Nothing here touches the scene. Each call records one command line,
//! and the caller replays the lines through the command dispatcher once the
//! script has finished without errors.
//!
//! Usage in Rhai:
//! ```rhai
//! create_circle("sun", 400, 200, 30, 255, 200, 0);
//! move_object("sun", 10, 0);
//! set_position("sun", 0, 0);
//! set_color("sun", 255, 0, 0);
//! delete_obj("sun");
//! log_message("done");
//! ```

use rhai::{Dynamic, EvalAltResult, Position};
use std::sync::{Arc, RwLock};

/// Command lines recorded by the current run
pub type Recorder = Arc<RwLock<Vec<String>>>;

fn record(recorder: &Recorder, command: String) {
    if let Ok(mut commands) = recorder.write() {
        commands.push(command);
    }
}

/// Accept both Rhai integers and floats
fn number(func: &str, value: &Dynamic) -> Result<f64, Box<EvalAltResult>> {
    if let Ok(f) = value.as_float() {
        return Ok(f);
    }
    if let Ok(i) = value.as_int() {
        return Ok(i as f64);
    }
    Err(EvalAltResult::ErrorRuntime(
        format!("{}: expected a number, got {}", func, value.type_name()).into(),
        Position::NONE,
    )
    .into())
}

/// A name must survive being split on whitespace by the dispatcher
fn object_name<'a>(func: &str, name: &'a str) -> Result<&'a str, Box<EvalAltResult>> {
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(EvalAltResult::ErrorRuntime(
            format!("{}: invalid object name '{}'", func, name).into(),
            Position::NONE,
        )
        .into());
    }
    Ok(name)
}

/// Format a number the way the command bar expects it (`5`, not `5.0`)
fn fmt_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn numbers(func: &str, values: &[&Dynamic]) -> Result<String, Box<EvalAltResult>> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        out.push(fmt_number(number(func, value)?));
    }
    Ok(out.join(" "))
}

/// Create the scene module, recording into `recorder`
pub fn create_module(recorder: Recorder) -> rhai::Module {
    let mut module = rhai::Module::new();

    // move_object(name, dx, dy)
    {
        let r = Arc::clone(&recorder);
        module.set_native_fn(
            "move_object",
            move |name: &str, dx: Dynamic, dy: Dynamic| -> Result<(), Box<EvalAltResult>> {
                let name = object_name("move_object", name)?;
                let args = numbers("move_object", &[&dx, &dy])?;
                record(&r, format!("move {} {}", name, args));
                Ok(())
            },
        );
    }

    // set_position(name, x, y)
    {
        let r = Arc::clone(&recorder);
        module.set_native_fn(
            "set_position",
            move |name: &str, x: Dynamic, y: Dynamic| -> Result<(), Box<EvalAltResult>> {
                let name = object_name("set_position", name)?;
                let args = numbers("set_position", &[&x, &y])?;
                record(&r, format!("setPos {} {}", name, args));
                Ok(())
            },
        );
    }

    // set_color(name, r, g, b)
    {
        let rec = Arc::clone(&recorder);
        module.set_native_fn(
            "set_color",
            move |name: &str, r: Dynamic, g: Dynamic, b: Dynamic| -> Result<(), Box<EvalAltResult>> {
                let name = object_name("set_color", name)?;
                let args = numbers("set_color", &[&r, &g, &b])?;
                record(&rec, format!("color {} {}", name, args));
                Ok(())
            },
        );
    }

    // create_circle(name, x, y, size, r, g, b)
    {
        let rec = Arc::clone(&recorder);
        module.set_native_fn(
            "create_circle",
            move |name: &str,
                  x: Dynamic,
                  y: Dynamic,
                  size: Dynamic,
                  r: Dynamic,
                  g: Dynamic,
                  b: Dynamic|
                  -> Result<(), Box<EvalAltResult>> {
                let name = object_name("create_circle", name)?;
                let args = numbers("create_circle", &[&x, &y, &size, &r, &g, &b])?;
                record(&rec, format!("addCircle {} {}", name, args));
                Ok(())
            },
        );
    }

    // create_rect(name, x, y, size, r, g, b)
    {
        let rec = Arc::clone(&recorder);
        module.set_native_fn(
            "create_rect",
            move |name: &str,
                  x: Dynamic,
                  y: Dynamic,
                  size: Dynamic,
                  r: Dynamic,
                  g: Dynamic,
                  b: Dynamic|
                  -> Result<(), Box<EvalAltResult>> {
                let name = object_name("create_rect", name)?;
                let args = numbers("create_rect", &[&x, &y, &size, &r, &g, &b])?;
                record(&rec, format!("addRect {} {}", name, args));
                Ok(())
            },
        );
    }

    // delete_obj(name)
    {
        let r = Arc::clone(&recorder);
        module.set_native_fn(
            "delete_obj",
            move |name: &str| -> Result<(), Box<EvalAltResult>> {
                let name = object_name("delete_obj", name)?;
                record(&r, format!("delete {}", name));
                Ok(())
            },
        );
    }

    // log_message(msg)
    {
        let r = Arc::clone(&recorder);
        module.set_native_fn(
            "log_message",
            move |msg: &str| -> Result<(), Box<EvalAltResult>> {
                record(&r, format!("log {}", msg));
                Ok(())
            },
        );
    }

    module
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_print_without_fraction() {
        assert_eq!(fmt_number(5.0), "5");
        assert_eq!(fmt_number(-12.0), "-12");
        assert_eq!(fmt_number(2.5), "2.5");
    }

    #[test]
    fn names_with_spaces_are_rejected() {
        assert_eq!(object_name("f", "box").unwrap(), "box");
        assert!(object_name("f", "box 7").is_err());
        assert!(object_name("f", "tab\there").is_err());
        assert!(object_name("f", "").is_err());
    }
}
