use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";

/// Keys each section may carry, all string-valued.
const SECTIONS: &[(&str, &[&str])] = &[("quote", &["line_join"]), ("page", &["template", "title"])];

const LINE_JOINS: &[&str] = &["space", "newline"];

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let content = fs::read_to_string(CONFIG_PATH).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };
    if let Err(e) = check_defaults(&table) {
        panic!("Invalid default_config.toml: {e}");
    }
}

/// Mirror of the `Config` schema; `compiled_default` relies on this passing.
fn check_defaults(table: &toml::Table) -> Result<(), String> {
    for (section, value) in table {
        let Some((_, keys)) = SECTIONS.iter().find(|(name, _)| name == section) else {
            return Err(format!("unknown section [{section}]"));
        };
        let Some(fields) = value.as_table() else {
            return Err(format!("`{section}` must be a table"));
        };
        for (key, value) in fields {
            if !keys.contains(&key.as_str()) {
                return Err(format!("unknown key `{section}.{key}`"));
            }
            let Some(text) = value.as_str() else {
                return Err(format!("`{section}.{key}` must be a string"));
            };
            if key == "line_join" && !LINE_JOINS.contains(&text) {
                return Err(format!(
                    "`quote.line_join` must be one of {LINE_JOINS:?}, got {text:?}"
                ));
            }
        }
    }
    Ok(())
}
