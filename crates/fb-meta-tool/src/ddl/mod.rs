//! DDL script generation from schema metadata.
//!
//! The script is rendered in a fixed order (domains, tables, procedures),
//! each section introduced by a comment banner. Output is byte-for-byte
//! reproducible for a given [`Schema`] so generated files can be diffed.
//!
//! Procedure bodies contain `;`, so every procedure is bracketed by
//! `SET TERM ^ ;` / `SET TERM ; ^` and terminated with `^`.

pub mod clauses;

use crate::core::schema::{Column, Domain, Parameter, Procedure, Schema, Table};

use clauses::{body_terminator, check_clause, default_clause, not_null_clause};

/// First line of every generated script.
pub const SCRIPT_BANNER: &str = "/* --- GENERATED METADATA SCRIPT --- */";

const DOMAINS_BANNER: &str = "/* --- 1. DOMAINS --- */";
const TABLES_BANNER: &str = "/* --- 2. TABLES --- */";
const PROCEDURES_BANNER: &str = "/* --- 3. PROCEDURES --- */";

/// Directive switching the statement terminator to `^`.
pub const SET_TERM_ALT: &str = "SET TERM ^ ;";

/// Directive restoring the default `;` terminator.
pub const SET_TERM_DEFAULT: &str = "SET TERM ; ^";

/// Render the complete DDL script for a schema.
pub fn render_schema(schema: &Schema) -> String {
    let mut out = String::new();
    out.push_str(SCRIPT_BANNER);
    out.push('\n');
    render_domains(&schema.domains, &mut out);
    render_tables(&schema.tables, &mut out);
    render_procedures(&schema.procedures, &mut out);
    out
}

/// Append the domains section.
pub fn render_domains(domains: &[Domain], out: &mut String) {
    out.push_str(DOMAINS_BANNER);
    out.push('\n');
    for domain in domains {
        out.push_str(&render_domain(domain));
        out.push('\n');
    }
}

/// Append the tables section.
pub fn render_tables(tables: &[Table], out: &mut String) {
    out.push('\n');
    out.push_str(TABLES_BANNER);
    out.push('\n');
    for table in tables {
        out.push_str(&render_table(table));
        out.push('\n');
    }
}

/// Append the procedures section. Each procedure is followed by a blank line.
pub fn render_procedures(procedures: &[Procedure], out: &mut String) {
    out.push('\n');
    out.push_str(PROCEDURES_BANNER);
    out.push('\n');
    for procedure in procedures {
        out.push_str(&render_procedure(procedure));
        out.push('\n');
    }
}

/// `CREATE DOMAIN` statement, terminated with `;`.
///
/// Clause order: DEFAULT, NOT NULL, CHECK.
pub fn render_domain(domain: &Domain) -> String {
    let mut ddl = format!(
        "CREATE DOMAIN {} AS {}",
        domain.name, domain.type_definition
    );

    let optional = [
        default_clause(domain.default_expression.as_deref()),
        not_null_clause(domain.is_not_null),
        check_clause(domain.check_constraint.as_deref()),
    ];
    for fragment in optional.into_iter().flatten() {
        ddl.push_str(&fragment);
    }

    ddl.push(';');
    ddl
}

/// Single column definition line (tab-indented, no trailing comma).
pub fn render_column(column: &Column) -> String {
    let mut line = format!("\t{} {}", column.name, column.type_definition);

    let optional = [
        default_clause(column.default_expression.as_deref()),
        not_null_clause(!column.is_nullable),
    ];
    for fragment in optional.into_iter().flatten() {
        line.push_str(&fragment);
    }

    line
}

/// `CREATE TABLE` statement with columns in stored order.
pub fn render_table(table: &Table) -> String {
    let columns: Vec<String> = table.columns.iter().map(render_column).collect();
    format!("CREATE TABLE {} (\n{}\n);", table.name, columns.join(",\n"))
}

fn render_parameter_list(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|p| format!("\t{} {}", p.name, p.type_definition))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// `CREATE PROCEDURE` block including the terminator switch directives.
///
/// Empty parameter lists omit their clause entirely.
pub fn render_procedure(procedure: &Procedure) -> String {
    let mut ddl = String::new();
    ddl.push_str(SET_TERM_ALT);
    ddl.push('\n');
    ddl.push_str(&format!("CREATE PROCEDURE {}", procedure.name));

    if !procedure.input_parameters.is_empty() {
        ddl.push_str(" (\n");
        ddl.push_str(&render_parameter_list(&procedure.input_parameters));
        ddl.push_str("\n)");
    }

    if !procedure.output_parameters.is_empty() {
        ddl.push_str("\nRETURNS (\n");
        ddl.push_str(&render_parameter_list(&procedure.output_parameters));
        ddl.push_str("\n)");
    }

    ddl.push_str("\nAS\n");
    ddl.push_str(procedure.source.trim_end());
    ddl.push('\n');

    if let Some(terminator) = body_terminator(&procedure.source) {
        ddl.push_str(&terminator);
    }

    ddl.push('\n');
    ddl.push_str(SET_TERM_DEFAULT);
    ddl.push('\n');
    ddl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Parameter;

    #[test]
    fn test_domain_not_null() {
        let domain = Domain::new("AGE_T", "INTEGER").not_null();
        assert_eq!(render_domain(&domain), "CREATE DOMAIN AGE_T AS INTEGER NOT NULL;");
    }

    #[test]
    fn test_domain_clause_order() {
        let domain = Domain::new("QTY", "SMALLINT")
            .with_default("DEFAULT 1")
            .not_null()
            .with_check("(VALUE > 0)");
        assert_eq!(
            render_domain(&domain),
            "CREATE DOMAIN QTY AS SMALLINT DEFAULT 1 NOT NULL CHECK (VALUE > 0);"
        );
    }

    #[test]
    fn test_domain_default_never_double_prefixed() {
        let domain = Domain::new("FLAG", "CHAR(1)").with_default("default 'N'");
        let ddl = render_domain(&domain);
        assert_eq!(ddl, "CREATE DOMAIN FLAG AS CHAR(1) default 'N';");
        assert_eq!(ddl.to_uppercase().matches("DEFAULT").count(), 1);
    }

    #[test]
    fn test_domain_empty_default_omitted() {
        let mut domain = Domain::new("D", "DATE");
        domain.default_expression = Some(String::new());
        domain.check_constraint = Some(String::new());
        assert_eq!(render_domain(&domain), "CREATE DOMAIN D AS DATE;");
    }

    #[test]
    fn test_table_preserves_column_order() {
        let table = Table::new(
            "ORDERS",
            vec![
                Column::new("ID", "INTEGER").not_null(),
                Column::new("STATUS", "CHAR(1)").with_default("'N'"),
                Column::new("AMOUNT", "NUMERIC(18, 2)"),
                Column::new("CUSTOMER_AGE", "AGE_T"),
            ],
        );
        assert_eq!(
            render_table(&table),
            "CREATE TABLE ORDERS (\n\
             \tID INTEGER NOT NULL,\n\
             \tSTATUS CHAR(1) DEFAULT 'N',\n\
             \tAMOUNT NUMERIC(18, 2),\n\
             \tCUSTOMER_AGE AGE_T\n\
             );"
        );
    }

    #[test]
    fn test_column_default_then_not_null() {
        let column = Column::new("CREATED", "TIMESTAMP")
            .with_default("DEFAULT CURRENT_TIMESTAMP")
            .not_null();
        assert_eq!(
            render_column(&column),
            "\tCREATED TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL"
        );
    }

    #[test]
    fn test_procedure_without_parameters() {
        let procedure = Procedure::new("P", "BEGIN END");
        assert_eq!(
            render_procedure(&procedure),
            "SET TERM ^ ;\nCREATE PROCEDURE P\nAS\nBEGIN END\n^\nSET TERM ; ^\n"
        );
    }

    #[test]
    fn test_procedure_inputs_only_omits_returns() {
        let procedure = Procedure::new("P", "BEGIN END")
            .with_inputs(vec![Parameter::new("A", "INTEGER")]);
        let ddl = render_procedure(&procedure);
        assert!(ddl.contains("CREATE PROCEDURE P (\n\tA INTEGER\n)\nAS\n"));
        assert!(!ddl.contains("RETURNS"));
    }

    #[test]
    fn test_procedure_inputs_and_outputs() {
        let procedure = Procedure::new(
            "GET_TOTAL",
            "BEGIN\n  TOTAL = A + B;\n  SUSPEND;\nEND\n",
        )
        .with_inputs(vec![
            Parameter::new("A", "INTEGER"),
            Parameter::new("B", "INTEGER"),
        ])
        .with_outputs(vec![Parameter::new("TOTAL", "BIGINT")]);

        assert_eq!(
            render_procedure(&procedure),
            "SET TERM ^ ;\n\
             CREATE PROCEDURE GET_TOTAL (\n\
             \tA INTEGER,\n\
             \tB INTEGER\n\
             )\n\
             RETURNS (\n\
             \tTOTAL BIGINT\n\
             )\n\
             AS\n\
             BEGIN\n  TOTAL = A + B;\n  SUSPEND;\nEND\n\
             ^\n\
             SET TERM ; ^\n"
        );
    }

    #[test]
    fn test_procedure_source_already_terminated() {
        let procedure = Procedure::new("P", "BEGIN END^  \n");
        assert_eq!(
            render_procedure(&procedure),
            "SET TERM ^ ;\nCREATE PROCEDURE P\nAS\nBEGIN END^\n\nSET TERM ; ^\n"
        );
    }

    #[test]
    fn test_render_schema_layout() {
        let schema = Schema {
            domains: vec![Domain::new("AGE_T", "INTEGER").not_null()],
            tables: vec![Table::new("PEOPLE", vec![Column::new("AGE", "AGE_T")])],
            procedures: vec![Procedure::new("P", "BEGIN END")],
        };

        let expected = "/* --- GENERATED METADATA SCRIPT --- */\n\
                        /* --- 1. DOMAINS --- */\n\
                        CREATE DOMAIN AGE_T AS INTEGER NOT NULL;\n\
                        \n\
                        /* --- 2. TABLES --- */\n\
                        CREATE TABLE PEOPLE (\n\
                        \tAGE AGE_T\n\
                        );\n\
                        \n\
                        /* --- 3. PROCEDURES --- */\n\
                        SET TERM ^ ;\n\
                        CREATE PROCEDURE P\n\
                        AS\n\
                        BEGIN END\n\
                        ^\n\
                        SET TERM ; ^\n\
                        \n";
        assert_eq!(render_schema(&schema), expected);
    }

    #[test]
    fn test_render_empty_schema_keeps_banners() {
        let script = render_schema(&Schema::default());
        assert_eq!(
            script,
            "/* --- GENERATED METADATA SCRIPT --- */\n\
             /* --- 1. DOMAINS --- */\n\
             \n/* --- 2. TABLES --- */\n\
             \n/* --- 3. PROCEDURES --- */\n"
        );
    }
}
