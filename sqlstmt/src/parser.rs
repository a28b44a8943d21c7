use common::err::{CResult, CoreError};

use crate::lexer::{Lexer, NO_DELIMITER};
use crate::statement::{ObjectType, Statement, StatementType};
use crate::token::{Token, TokenKind};

/// Drives the lexer and assembles [`Statement`]s. Holds the only state that
/// must persist across statements: the default database (`USE`) and
/// whether an explicit `DELIMITER` command has been seen yet (gates the
/// permissive `BEGIN ... END` consumption rule).
#[derive(Debug, Default)]
pub struct StatementParser {
    default_database: Option<String>,
    explicit_delimiter_seen: bool,
}

impl StatementParser {
    pub fn new() -> Self {
        StatementParser::default()
    }

    /// Parse every statement out of `input`. Never hard-fails: on a
    /// malformed-SQL error the statements completed so far are returned
    /// alongside the error.
    pub fn parse(&mut self, path: &str, input: &str) -> (Vec<Statement>, Option<CoreError>) {
        tracing::debug!(path, bytes = input.len(), "parsing SQL file");
        let mut lex = Lexer::new(path, input);
        let mut statements = Vec::new();

        if let Some(bom) = lex.consume_leading_bom() {
            statements.push(Statement {
                file_path: path.to_string(),
                line: 1,
                character: 0,
                text: bom.text(input).to_string(),
                default_database: self.default_database.clone(),
                statement_type: StatementType::Noop,
                object_type: ObjectType::None,
                object_name: None,
                object_qualifier: None,
                delimiter: lex.delimiter.clone(),
                error: None,
                name_clause: None,
            });
        }

        while !lex.at_eof() {
            match self.parse_one(&mut lex, path, input) {
                Ok(Some(stmt)) => statements.push(stmt),
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(path, statements = statements.len(), error = %e, "malformed SQL, returning partial statements");
                    return (statements, Some(e));
                }
            }
        }

        tracing::debug!(path, statements = statements.len(), "parse complete");
        (statements, None)
    }

    fn parse_one(&mut self, lex: &mut Lexer, path: &str, input: &str) -> CResult<Option<Statement>> {
        let start_pos = lex.pos();
        let start_line = lex.line();
        let start_col = lex.column();

        let mut tokens: Vec<Token> = Vec::new();
        let mut significant: Vec<Token> = Vec::new();

        // Peek the first significant token to decide scanning mode before
        // collecting the rest of the statement.
        loop {
            let Some(tok) = lex.next_token()? else { break };
            let is_filler = tok.kind == TokenKind::Filler;
            tokens.push(tok);
            if !is_filler {
                significant.push(tok);
                break;
            }
        }

        let first_word = significant
            .first()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.text(input).to_ascii_uppercase());

        let is_command = matches!(first_word.as_deref(), Some("USE") | Some("DELIMITER"));
        if is_command {
            lex.command_mode = true;
        }
        let is_delimiter_command = first_word.as_deref() == Some("DELIMITER");
        let saved_delimiter = lex.delimiter.clone();
        if is_delimiter_command {
            lex.delimiter = NO_DELIMITER.to_string();
        }

        let is_create = matches!(first_word.as_deref(), Some("CREATE"));
        let mut permissive_body = false;

        loop {
            if lex.at_eof() {
                break;
            }
            let Some(tok) = lex.next_token()? else { break };
            let is_filler = tok.kind == TokenKind::Filler;
            let is_delim = tok.kind == TokenKind::Delimiter;
            tokens.push(tok);
            if !is_filler {
                significant.push(tok);
            }

            if is_delim {
                break;
            }

            if is_create
                && !self.explicit_delimiter_seen
                && !permissive_body
                && tok.kind == TokenKind::Word
                && tok.text(input).eq_ignore_ascii_case("BEGIN")
            {
                let is_routine = significant.iter().any(|t| {
                    t.kind == TokenKind::Word
                        && (t.text(input).eq_ignore_ascii_case("PROCEDURE")
                            || t.text(input).eq_ignore_ascii_case("FUNCTION"))
                });
                let is_table = significant
                    .iter()
                    .any(|t| t.kind == TokenKind::Word && t.text(input).eq_ignore_ascii_case("TABLE"));
                if is_routine && !is_table {
                    permissive_body = true;
                    lex.delimiter = NO_DELIMITER.to_string();
                    lex.command_mode = false;
                }
            }
        }

        lex.command_mode = false;
        if !permissive_body {
            lex.delimiter = saved_delimiter;
        }

        let end_pos = lex.pos();
        if end_pos == start_pos {
            return Ok(None);
        }
        let raw_text = &input[start_pos..end_pos];

        if significant.is_empty() {
            return Ok(Some(Statement {
                file_path: path.to_string(),
                line: start_line,
                character: start_col,
                text: raw_text.to_string(),
                default_database: self.default_database.clone(),
                statement_type: StatementType::Noop,
                object_type: ObjectType::None,
                object_name: None,
                object_qualifier: None,
                delimiter: lex.delimiter.clone(),
                error: None,
                name_clause: None,
            }));
        }

        let effective_db = self.default_database.clone();
        let mut stmt = Statement {
            file_path: path.to_string(),
            line: start_line,
            character: start_col,
            text: raw_text.to_string(),
            default_database: effective_db,
            statement_type: StatementType::Unknown,
            object_type: ObjectType::None,
            object_name: None,
            object_qualifier: None,
            delimiter: lex.delimiter.clone(),
            error: None,
            name_clause: None,
        };

        match first_word.as_deref() {
            Some("USE") => self.classify_use(&mut stmt, &significant, input),
            Some("DELIMITER") => self.classify_delimiter(&mut stmt, lex, &significant, input),
            Some("CREATE") => self.classify_create(&mut stmt, &significant, input, path),
            Some("ALTER") => self.classify_alter(&mut stmt, &significant, input),
            _ => {}
        }

        Ok(Some(stmt))
    }

    fn classify_use(&mut self, stmt: &mut Statement, significant: &[Token], input: &str) {
        stmt.statement_type = StatementType::Command;
        stmt.object_type = ObjectType::Database;
        if let Some(name_tok) = significant.get(1) {
            let name = unquote(name_tok.text(input));
            self.default_database = Some(name.clone());
            stmt.object_name = Some(name);
        }
    }

    fn classify_delimiter(&mut self, stmt: &mut Statement, lex: &mut Lexer, significant: &[Token], input: &str) {
        stmt.statement_type = StatementType::Command;
        stmt.object_type = ObjectType::None;

        let keyword_end = significant[0].end;
        let body_end = match significant.last() {
            Some(t) if t.kind == TokenKind::Delimiter => t.start,
            Some(t) => t.end,
            None => keyword_end,
        };
        let new_delim = input[keyword_end..body_end].trim().to_string();
        if !new_delim.is_empty() {
            lex.delimiter = new_delim.clone();
            stmt.object_name = Some(new_delim);
            stmt.delimiter = lex.delimiter.clone();
        }
        self.explicit_delimiter_seen = true;
    }

    fn classify_create(&mut self, stmt: &mut Statement, significant: &[Token], input: &str, path: &str) {
        let mut idx = 1; // skip CREATE
        if let Some(tok) = significant.get(idx) {
            if tok.kind == TokenKind::Word && tok.text(input).eq_ignore_ascii_case("DEFINER") {
                // Skip the DEFINER clause: `DEFINER = <user-clause>` up to
                // the next recognized object keyword.
                idx += 1;
                while let Some(t) = significant.get(idx) {
                    let text = t.text(input);
                    if t.kind == TokenKind::Word
                        && (text.eq_ignore_ascii_case("TABLE")
                            || text.eq_ignore_ascii_case("PROCEDURE")
                            || text.eq_ignore_ascii_case("FUNCTION"))
                    {
                        break;
                    }
                    idx += 1;
                }
            }
        }

        let Some(kind_tok) = significant.get(idx) else { return };
        let kind_text = kind_tok.text(input);
        stmt.object_type = if kind_text.eq_ignore_ascii_case("TABLE") {
            ObjectType::Table
        } else if kind_text.eq_ignore_ascii_case("PROCEDURE") {
            ObjectType::Procedure
        } else if kind_text.eq_ignore_ascii_case("FUNCTION") {
            ObjectType::Function
        } else {
            stmt.statement_type = StatementType::Unknown;
            return;
        };
        idx += 1;

        let (qualifier, name, name_clause) = parse_object_name(&significant[idx..], input);
        stmt.object_qualifier = qualifier;
        stmt.object_name = name;
        stmt.name_clause = name_clause;

        if stmt.object_type == ObjectType::Table {
            let has_select = significant
                .iter()
                .skip(idx)
                .any(|t| t.kind == TokenKind::Word && t.text(input).eq_ignore_ascii_case("SELECT"));
            if has_select {
                stmt.statement_type = StatementType::Forbidden;
                stmt.error = Some(CoreError::ForbiddenConstruct {
                    path: path.to_string(),
                    line: stmt.line,
                    column: stmt.character,
                    construct: "CREATE TABLE ... SELECT".to_string(),
                });
                return;
            }
        }

        stmt.statement_type = StatementType::Create;
    }

    fn classify_alter(&mut self, stmt: &mut Statement, significant: &[Token], input: &str) {
        let mut idx = 1;
        if let Some(tok) = significant.get(idx) {
            if tok.kind == TokenKind::Word && tok.text(input).eq_ignore_ascii_case("TABLE") {
                stmt.object_type = ObjectType::Table;
                idx += 1;
            }
        }
        let (qualifier, name, name_clause) = parse_object_name(&significant[idx.min(significant.len())..], input);
        stmt.object_qualifier = qualifier;
        stmt.object_name = name;
        stmt.name_clause = name_clause;
        stmt.statement_type = StatementType::Alter;
    }
}

/// Parse `[schema.]name`, each part optionally backtick-quoted, from the
/// start of `tokens`. Returns (qualifier, name, raw substring).
fn parse_object_name(tokens: &[Token], input: &str) -> (Option<String>, Option<String>, Option<String>) {
    let mut iter = tokens.iter();
    let Some(first) = iter.next() else { return (None, None, None) };
    if !matches!(first.kind, TokenKind::Word | TokenKind::Identifier) {
        return (None, None, None);
    }

    let clause_start = first.start;
    let mut last_end = first.end;
    let first_text = unquote(first.text(input));

    if let Some(dot) = tokens.get(1) {
        if dot.kind == TokenKind::Symbol && dot.text(input) == "." {
            if let Some(second) = tokens.get(2) {
                if matches!(second.kind, TokenKind::Word | TokenKind::Identifier) {
                    last_end = second.end;
                    let name = unquote(second.text(input));
                    let clause = input[clause_start..last_end].to_string();
                    return (Some(first_text), Some(name), Some(clause));
                }
            }
        }
    }

    let clause = input[clause_start..last_end].to_string();
    (None, Some(first_text), Some(clause))
}

fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('`') && s.ends_with('`') {
        s[1..s.len() - 1].replace("``", "`")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(input: &str) -> Vec<Statement> {
        StatementParser::new().parse("test.sql", input).0
    }

    #[test]
    fn whitespace_only_is_noop() {
        let stmts = parse("   \n  ");
        assert_eq!(stmts.len(), 1);
        assert!(stmts[0].is_noop());
    }

    #[test]
    fn round_trips_concatenated_text() {
        let input = "USE db;\nCREATE TABLE foo (id int);\n-- trailing\n";
        let stmts = parse(input);
        let joined: String = stmts.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn use_sets_default_database_for_next_statement() {
        let stmts = parse("USE appdb;\nCREATE TABLE t (id int);");
        assert_eq!(stmts[0].object_name.as_deref(), Some("appdb"));
        assert_eq!(stmts[0].default_database, None);
        assert_eq!(stmts[1].default_database.as_deref(), Some("appdb"));
    }

    #[test]
    fn create_table_with_schema_qualifier() {
        let stmts = parse("CREATE TABLE `myschema`.`users` (id int);");
        let s = &stmts[0];
        assert_eq!(s.statement_type, StatementType::Create);
        assert_eq!(s.object_type, ObjectType::Table);
        assert_eq!(s.object_qualifier.as_deref(), Some("myschema"));
        assert_eq!(s.object_name.as_deref(), Some("users"));
    }

    #[test]
    fn create_table_select_is_forbidden() {
        let stmts = parse("CREATE TABLE copy AS SELECT * FROM orig;");
        assert_eq!(stmts[0].statement_type, StatementType::Forbidden);
        assert!(stmts[0].error.is_some());
    }

    #[test]
    fn definer_clause_is_skipped() {
        let stmts = parse("CREATE DEFINER=`root`@`localhost` PROCEDURE p1() BEGIN SELECT 1; END;");
        assert_eq!(stmts[0].object_type, ObjectType::Procedure);
        assert_eq!(stmts[0].object_name.as_deref(), Some("p1"));
    }

    #[test]
    fn quoted_current_user_definer_clause_is_skipped() {
        let stmts = parse("CREATE DEFINER = CURRENT_USER() FUNCTION f1() RETURNS INT BEGIN RETURN 1; END;");
        assert_eq!(stmts[0].object_type, ObjectType::Function);
        assert_eq!(stmts[0].object_name.as_deref(), Some("f1"));
    }

    #[test]
    fn view_is_unknown_not_create() {
        let stmts = parse("CREATE VIEW v1 AS SELECT 1;");
        assert_eq!(stmts[0].statement_type, StatementType::Unknown);
    }

    #[test]
    fn delimiter_command_changes_active_delimiter() {
        let stmts = parse("DELIMITER //\nCREATE TABLE t (id int)//\nDELIMITER ;\n");
        assert_eq!(stmts[0].statement_type, StatementType::Command);
        assert_eq!(stmts[1].delimiter, "//");
        assert_eq!(stmts[1].statement_type, StatementType::Create);
    }

    #[test]
    fn unicode_delimiter_scenario() {
        let input = "DELIMITER \u{1f4a9}\u{1f4a9}\u{1f4a9}\nCREATE TABLE uhoh (x varchar(20) default 'ok \u{1f4a9}\u{1f4a9}\u{1f4a9} cool')\u{1f4a9}\u{1f4a9}\u{1f4a9}\n";
        let stmts = parse(input);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[1].statement_type, StatementType::Create);
        assert_eq!(stmts[1].object_name.as_deref(), Some("uhoh"));
        assert_eq!(stmts[1].delimiter, "\u{1f4a9}\u{1f4a9}\u{1f4a9}");
        assert!(stmts[1].text.ends_with("\u{1f4a9}\u{1f4a9}\u{1f4a9}"));
    }

    #[test]
    fn permissive_begin_consumption_without_explicit_delimiter() {
        let input = "CREATE PROCEDURE p1() BEGIN SELECT ';'; END;";
        let stmts = parse(input);
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].statement_type, StatementType::Create);
    }
}
