#![no_main]

use latte::diagnostics::ErrorManager;
use latte::lexer::{self, ScannerConfig};
use latte::{parser, printer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Tolerant mode must recover from anything without panicking
        let mut err = ErrorManager::tolerant();
        if let Ok(tree) = lexer::lex(s, &ScannerConfig::default(), &mut err) {
            if let Ok(statements) = parser::parse(&tree, &mut err) {
                let _ = printer::render(&statements);
            }
        }
    }
});
