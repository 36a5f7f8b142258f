/// Parse a node tree into statements.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tree`: Node tree produced by [`crate::lexer::lex`].
/// - `err`: Error manager shared with the lexer.
///
/// ## Errors
/// Returns the first error in fast-fail mode. In tolerant mode the result is `Ok` with every
/// statement that parsed, and the errors stay recorded in `err`.
#[tracing::instrument(skip_all, fields(node_count = tree.len()))]
pub fn parse(tree: &NodeTree, err: &mut ErrorManager) -> Result<Vec<Statement>, CompileError> {
    let statements = Parser::new(tree, err, tree.root()).run()?;
    tracing::debug!(statements = statements.len(), "parsed");
    Ok(statements)
}
