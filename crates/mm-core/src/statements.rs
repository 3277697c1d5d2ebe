//! SQL generation for menu operations
//!
//! Entities are addressed by natural keys (names); surrogate ids are resolved
//! at execution time with correlated sub-selects. Every operation validates
//! its options before producing any SQL, so a rejected operation never leaves
//! a partial statement in the script.

use crate::error::CoreResult;
use crate::operation::{Operation, OperationKind, OptionValue};
use crate::script::Script;
use crate::sql_utils::{quote_literal, Columns, SqlValue};
use crate::validate::validate;

const FUNCTIONAL_AREA_KEYS: &[&str] = &["rmd_menu", "rename"];
const ADD_PROGRAM_KEYS: &[&str] = &["functional_area", "seq"];
const DROP_PROGRAM_KEYS: &[&str] = &["functional_area"];
const CHANGE_PROGRAM_KEYS: &[&str] = &["functional_area", "seq", "rename"];
const ADD_PROGRAM_FUNCTION_KEYS: &[&str] = &[
    "functional_area",
    "program",
    "url",
    "seq",
    "group",
    "restricted",
    "show_in_iframe",
    "hide_if_const_true",
    "hide_if_const_false",
];
const DROP_PROGRAM_FUNCTION_KEYS: &[&str] = &["functional_area", "program", "match_group"];
const MOVE_PROGRAM_FUNCTION_KEYS: &[&str] = &[
    "functional_area",
    "program",
    "match_group",
    "to_program",
    "to_functional_area",
];
const CHANGE_PROGRAM_FUNCTION_KEYS: &[&str] = &[
    "functional_area",
    "program",
    "match_group",
    "rename",
    "group",
    "url",
    "seq",
    "restricted",
    "show_in_iframe",
    "hide_if_const_true",
    "hide_if_const_false",
];

/// Append the SQL for `op` to `script`.
///
/// `webapp` is the application the owning migration is bound to; it is only
/// used when linking a new program.
pub fn append_operation(script: &mut Script, op: &Operation, webapp: &str) -> CoreResult<()> {
    log::debug!("{} '{}'", op.kind, op.name);
    for statement in statements_for(op, webapp)? {
        script.push(statement);
    }
    Ok(())
}

/// Build the statements for a single operation.
pub fn statements_for(op: &Operation, webapp: &str) -> CoreResult<Vec<String>> {
    validate_strings(op)?;
    match op.kind {
        OperationKind::AddFunctionalArea => add_functional_area(op),
        OperationKind::DropFunctionalArea => drop_functional_area(op),
        OperationKind::ChangeFunctionalArea => change_functional_area(op),
        OperationKind::AddProgram => add_program(op, webapp),
        OperationKind::DropProgram => drop_program(op),
        OperationKind::ChangeProgram => change_program(op),
        OperationKind::AddProgramFunction => add_program_function(op),
        OperationKind::DropProgramFunction => drop_program_function(op),
        OperationKind::MoveProgramFunction => move_program_function(op),
        OperationKind::ChangeProgramFunction => change_program_function(op),
    }
}

/// Every string option is checked, including `url` and the
/// `hide_if_const_*` names, not only the ones used to look rows up.
fn validate_strings(op: &Operation) -> CoreResult<()> {
    let mut values = vec![Some(op.name.as_str())];
    values.extend(op.options.values().map(|value| match value {
        OptionValue::Str(s) => Some(s.as_str()),
        _ => None,
    }));
    validate(&values)
}

/// Join lines into one multi-line statement with a trailing newline.
fn block(lines: &[String]) -> String {
    let mut sql = lines.join("\n");
    sql.push('\n');
    sql
}

/// `(SELECT id FROM functional_areas WHERE functional_area_name = 'x')`
fn functional_area_id(functional_area: &str) -> String {
    format!(
        "(SELECT id FROM functional_areas WHERE functional_area_name = {})",
        quote_literal(functional_area)
    )
}

/// Program id scoped by program name and functional area name
fn program_id(program: &str, functional_area: &str) -> String {
    format!(
        "(SELECT id FROM programs WHERE program_name = {} AND functional_area_id = {})",
        quote_literal(program),
        functional_area_id(functional_area)
    )
}

/// WHERE-clause fragment selecting a program function.
///
/// The group is a discriminator: without a match group only ungrouped
/// functions match.
fn program_function_match(
    name: &str,
    match_group: Option<&str>,
    program: &str,
    functional_area: &str,
) -> String {
    let group = match match_group {
        Some(group) => format!("group_name = {}", quote_literal(group)),
        None => "group_name IS NULL".to_string(),
    };
    format!(
        "program_function_name = {} AND {} AND program_id = {}",
        quote_literal(name),
        group,
        program_id(program, functional_area)
    )
}

// ===== Functional areas =====

fn add_functional_area(op: &Operation) -> CoreResult<Vec<String>> {
    op.check_keys(&["rmd_menu"])?;
    let rmd_menu = op.bool_opt("rmd_menu")?.unwrap_or(false);

    let mut cols = Columns::new();
    cols.push("functional_area_name", SqlValue::Text(op.name.clone()))
        .push("rmd_menu", SqlValue::Bool(rmd_menu));

    Ok(vec![format!(
        "INSERT INTO functional_areas ({}) VALUES({});",
        cols.names(),
        cols.values()
    )])
}

fn drop_functional_area(op: &Operation) -> CoreResult<Vec<String>> {
    op.check_keys(&[])?;
    let area = format!(
        "(SELECT id FROM functional_areas WHERE functional_area_name ={})",
        quote_literal(&op.name)
    );
    let programs = format!("(SELECT id FROM programs WHERE functional_area_id = {area})");

    Ok(vec![
        format!(
            "DELETE FROM program_functions_users WHERE program_function_id IN (SELECT id FROM program_functions WHERE program_id IN {programs});"
        ),
        format!("DELETE FROM program_functions WHERE program_id IN {programs};"),
        format!("DELETE FROM programs_webapps WHERE program_id IN {programs};"),
        format!("DELETE FROM programs_users WHERE program_id IN {programs};"),
        format!("DELETE FROM programs WHERE functional_area_id = {area};"),
        format!(
            "DELETE FROM functional_areas WHERE functional_area_name ={};",
            quote_literal(&op.name)
        ),
    ])
}

fn change_functional_area(op: &Operation) -> CoreResult<Vec<String>> {
    op.check_keys(FUNCTIONAL_AREA_KEYS)?;
    if op.options.is_empty() {
        return Err(op.no_changes());
    }

    let mut cols = Columns::new();
    cols.push_some(
        "functional_area_name",
        op.str_opt("rename")?.map(|s| SqlValue::Text(s.to_string())),
    )
    .push_some("rmd_menu", op.bool_opt("rmd_menu")?.map(SqlValue::Bool));

    Ok(vec![format!(
        "UPDATE functional_areas SET {} WHERE functional_area_name = {};",
        cols.assignments(),
        quote_literal(&op.name)
    )])
}

// ===== Programs =====

fn add_program(op: &Operation, webapp: &str) -> CoreResult<Vec<String>> {
    op.check_keys(ADD_PROGRAM_KEYS)?;
    let functional_area = op.require_str("functional_area")?;
    let seq = op.int_opt("seq")?.unwrap_or(1);
    let name = quote_literal(&op.name);
    let area = functional_area_id(functional_area);

    Ok(vec![block(&[
        "INSERT INTO programs (program_name, program_sequence, functional_area_id)".to_string(),
        format!("VALUES ({name}, {seq}, {area});"),
        "INSERT INTO programs_webapps (program_id, webapp)".to_string(),
        format!("VALUES ((SELECT id FROM programs WHERE program_name = {name}"),
        format!(
            "         AND functional_area_id = {area}), {});",
            quote_literal(webapp)
        ),
    ])])
}

fn drop_program(op: &Operation) -> CoreResult<Vec<String>> {
    op.check_keys(DROP_PROGRAM_KEYS)?;
    let functional_area = quote_literal(op.require_str("functional_area")?);
    let name = quote_literal(&op.name);

    // DELETE of every row pointing at this program
    let program_scope = |table: &str| {
        block(&[
            format!("DELETE FROM {table}"),
            "WHERE program_id = (".to_string(),
            "  SELECT id".to_string(),
            "  FROM programs".to_string(),
            format!("  WHERE program_name = {name}"),
            "    AND functional_area_id = (".to_string(),
            "      SELECT id".to_string(),
            "      FROM functional_areas".to_string(),
            format!("      WHERE functional_area_name ={functional_area}));"),
        ])
    };

    Ok(vec![
        block(&[
            "DELETE FROM program_functions_users".to_string(),
            "WHERE program_function_id IN (".to_string(),
            "  SELECT id".to_string(),
            "  FROM program_functions".to_string(),
            format!(
                "  WHERE program_id = (SELECT id FROM programs WHERE program_name = {name} AND functional_area_id = (SELECT id FROM functional_areas WHERE functional_area_name = {functional_area})));"
            ),
        ]),
        program_scope("program_functions"),
        program_scope("programs_webapps"),
        program_scope("programs_users"),
        block(&[
            "DELETE FROM programs".to_string(),
            format!("WHERE program_name = {name}"),
            "  AND functional_area_id = (".to_string(),
            "    SELECT id".to_string(),
            "    FROM functional_areas".to_string(),
            format!("    WHERE functional_area_name ={functional_area});"),
        ]),
    ])
}

fn change_program(op: &Operation) -> CoreResult<Vec<String>> {
    op.check_keys(CHANGE_PROGRAM_KEYS)?;
    let functional_area = op.require_str("functional_area")?;
    if op.count_options(&[]) < 2 {
        return Err(op.no_changes());
    }

    let mut cols = Columns::new();
    cols.push_some(
        "program_name",
        op.str_opt("rename")?.map(|s| SqlValue::Text(s.to_string())),
    )
    .push_some("program_sequence", op.int_opt("seq")?.map(SqlValue::Int));

    Ok(vec![format!(
        "UPDATE programs SET {} WHERE program_name = {} AND functional_area_id = {};",
        cols.assignments(),
        quote_literal(&op.name),
        functional_area_id(functional_area)
    )])
}

// ===== Program functions =====

fn add_program_function(op: &Operation) -> CoreResult<Vec<String>> {
    op.check_keys(ADD_PROGRAM_FUNCTION_KEYS)?;
    let functional_area = op.require_str("functional_area")?;
    let program = op.require_str("program")?;
    let url = op.require_str("url")?;
    let seq = op.int_opt("seq")?.unwrap_or(1);
    let group = op.nullable_str("group")?.flatten();
    let restricted = op.bool_opt("restricted")?.unwrap_or(false);
    let show_in_iframe = op.bool_opt("show_in_iframe")?.unwrap_or(false);
    let hide_if_const_true = op.nullable_str("hide_if_const_true")?.flatten();
    let hide_if_const_false = op.nullable_str("hide_if_const_false")?.flatten();

    let mut cols = Columns::new();
    cols.push("program_id", SqlValue::Expr(program_id(program, functional_area)))
        .push("program_function_name", SqlValue::Text(op.name.clone()))
        .push("group_name", SqlValue::text_or_null(group))
        .push("url", SqlValue::Text(url.to_string()))
        .push("program_function_sequence", SqlValue::Int(seq))
        .push("restricted_user_access", SqlValue::Bool(restricted))
        .push("show_in_iframe", SqlValue::Bool(show_in_iframe))
        .push_some(
            "hide_if_const_true",
            hide_if_const_true.map(|s| SqlValue::Text(s.to_string())),
        )
        .push_some(
            "hide_if_const_false",
            hide_if_const_false.map(|s| SqlValue::Text(s.to_string())),
        );

    Ok(vec![format!(
        "INSERT INTO program_functions ({}) VALUES ({});",
        cols.names(),
        cols.values()
    )])
}

fn drop_program_function(op: &Operation) -> CoreResult<Vec<String>> {
    op.check_keys(DROP_PROGRAM_FUNCTION_KEYS)?;
    let functional_area = op.require_str("functional_area")?;
    let program = op.require_str("program")?;
    let match_group = op.nullable_str("match_group")?.flatten();
    let matcher = program_function_match(&op.name, match_group, program, functional_area);

    Ok(vec![
        format!(
            "DELETE FROM program_functions_users WHERE program_function_id IN (SELECT id FROM program_functions WHERE {matcher});"
        ),
        format!("DELETE FROM program_functions WHERE {matcher};"),
    ])
}

fn move_program_function(op: &Operation) -> CoreResult<Vec<String>> {
    op.check_keys(MOVE_PROGRAM_FUNCTION_KEYS)?;
    if op.count_options(&["match_group"]) < 3 {
        return Err(op.no_changes());
    }
    let functional_area = op.require_str("functional_area")?;
    let program = op.require_str("program")?;
    let match_group = op.nullable_str("match_group")?.flatten();
    let to_program = op.require_str("to_program")?;
    let to_functional_area = op.str_opt("to_functional_area")?.unwrap_or(functional_area);

    Ok(vec![format!(
        "UPDATE program_functions SET program_id = {} WHERE id = (SELECT id FROM program_functions WHERE {});",
        program_id(to_program, to_functional_area),
        program_function_match(&op.name, match_group, program, functional_area)
    )])
}

fn change_program_function(op: &Operation) -> CoreResult<Vec<String>> {
    op.check_keys(CHANGE_PROGRAM_FUNCTION_KEYS)?;
    if op.count_options(&["match_group"]) < 3 {
        return Err(op.no_changes());
    }
    let functional_area = op.require_str("functional_area")?;
    let program = op.require_str("program")?;
    let match_group = op.nullable_str("match_group")?.flatten();

    let text = |s: &str| SqlValue::Text(s.to_string());
    let mut cols = Columns::new();
    cols.push_some("program_function_name", op.str_opt("rename")?.map(text))
        .push_some(
            "group_name",
            op.nullable_str("group")?.map(SqlValue::text_or_null),
        )
        .push_some("url", op.str_opt("url")?.map(text))
        .push_some(
            "program_function_sequence",
            op.int_opt("seq")?.map(SqlValue::Int),
        )
        .push_some(
            "restricted_user_access",
            op.bool_opt("restricted")?.map(SqlValue::Bool),
        )
        .push_some("show_in_iframe", op.bool_opt("show_in_iframe")?.map(SqlValue::Bool))
        .push_some(
            "hide_if_const_true",
            op.nullable_str("hide_if_const_true")?.map(SqlValue::text_or_null),
        )
        .push_some(
            "hide_if_const_false",
            op.nullable_str("hide_if_const_false")?.map(SqlValue::text_or_null),
        );

    Ok(vec![format!(
        "UPDATE program_functions SET {} WHERE {};",
        cols.assignments(),
        program_function_match(&op.name, match_group, program, functional_area)
    )])
}

#[cfg(test)]
#[path = "statements_test.rs"]
mod tests;
