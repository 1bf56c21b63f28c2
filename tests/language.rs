use std::{cell::RefCell, fs, io::Write, rc::Rc};

use logoscript::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, MAX_CALL_DEPTH},
        value::core::Value,
    },
    run_script,
};
use walkdir::WalkDir;

const SCRIPTS_DIR: &str = "tests/scripts";

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn run_capturing(src: &str) -> (Result<(), RuntimeError>, String) {
    let buffer = SharedBuffer::default();
    let mut context = Context::new().with_output(buffer.clone())
                                    .with_corpus_dir(SCRIPTS_DIR);
    let result = context.run_source(src);
    let text = String::from_utf8_lossy(&buffer.0.borrow()).into_owned();
    (result, text)
}

fn assert_success(src: &str) {
    if let (Err(e), _) = run_capturing(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if run_capturing(src).0.is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn assert_output(src: &str, expected: &str) {
    match run_capturing(src) {
        (Ok(()), out) => assert_eq!(out, expected, "unexpected output from:\n{src}"),
        (Err(e), _) => panic!("Script failed: {e}"),
    }
}

#[test]
fn corpus_scripts_run() {
    let mut count = 0;

    for entry in
        WalkDir::new(SCRIPTS_DIR).into_iter()
                                 .filter_map(Result::ok)
                                 .filter(|e| e.path().extension().is_some_and(|ext| ext == "logo"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let (result, out) = run_capturing(&source);
        if let Err(e) = result {
            panic!("Script {path:?} failed:\n{source}\nError: {e}");
        }

        let expected = path.with_extension("out");
        if expected.exists() {
            let expected = fs::read_to_string(&expected).unwrap_or_else(|e| {
                                                            panic!("Failed to read {expected:?}: {e}")
                                                        });
            assert_eq!(out, expected, "output of {path:?} differs");
        }
    }

    assert!(count > 0, "No scripts found in {SCRIPTS_DIR}");
}

#[test]
fn run_script_reports_errors() {
    assert!(run_script("make \"x 1").is_ok());
    assert!(run_script("print :nowhere").is_err());
}

#[test]
fn end_to_end_examples() {
    let mut context = Context::new();
    assert_eq!(context.evaluate("1 + 2 + 3").unwrap(),
               Value::from(vec![Value::Number(6.0)]));

    assert_output("PRINT 2 + 2", "4\n");
    assert_output("to double :n\noutput :n * 2\nend\nprint double 5", "10\n");
}

#[test]
fn names_ignore_case() {
    assert_output("MAKE \"Size 4\nPrint :SIZE * 2", "8\n");
    assert_output("to Shout :w\nprint uppercase :w\nEND\nshout \"hey", "HEY\n");
}

#[test]
fn precedence_and_grouping() {
    assert_output("print 1 + 2 * 3", "7\n");
    assert_output("print (1 + 2) * 3", "9\n");
    assert_output("print 10 - 4 - 3", "3\n");
    assert_output("print -2 * 3", "-6\n");
}

#[test]
fn arity_drives_argument_consumption() {
    assert_output("print first \"word", "w\n");
    assert_output("print sum 1 product 2 3", "7\n");
    assert_output("print (sum 1 2 3)\nprint 4", "6\n4\n");
}

#[test]
fn recursive_procedure() {
    assert_output("to fact :n\nif :n < 2 [output 1]\noutput :n * fact :n - 1\nend\nprint fact 6",
                  "720\n");
}

#[test]
fn recursion_up_to_the_default_limit_succeeds() {
    let depth = MAX_CALL_DEPTH - 1;
    let expected = depth * (depth + 1) / 2;
    assert_output(&format!("to tri :n\nif :n = 0 [output 0]\noutput :n + tri :n - 1\nend\nprint tri {depth}"),
                  &format!("{expected}\n"));
}

#[test]
fn runaway_recursion_hits_the_default_limit() {
    let (result, _) = run_capturing("to down :n\ndown :n + 1\nend\ndown 0");
    assert!(matches!(result, Err(RuntimeError::RecursionLimit { depth: MAX_CALL_DEPTH, .. })));
}

#[test]
fn make_in_nested_call_is_global() {
    assert_output("to inner\nmake \"x 5\nend\nto outer\ninner\nend\nouter\nprint :x\nprint thing \"x",
                  "5\n5\n");
}

#[test]
fn conditional_runs_only_the_chosen_branch() {
    assert_output("if 1 = 1 [print \"yes]\nif 1 = 2 [print \"no]", "yes\n");
    assert_output("ifelse 3 > 4 [print \"more] [print \"less]", "less\n");
    assert_output("print ifelse \"true [1] [2]", "1\n");
}

#[test]
fn load_runs_a_corpus_script() {
    let buffer = SharedBuffer::default();
    let mut context = Context::new().with_output(buffer.clone())
                                    .with_corpus_dir(SCRIPTS_DIR);
    context.run_source("load \"greet").unwrap();
    context.run_source("greet \"there").unwrap();
    assert_eq!(String::from_utf8_lossy(&buffer.0.borrow()), "hello there\n");
}

#[test]
fn foreach_and_repeat() {
    assert_output("foreach [x y] [print word # ?]", "1x\n2y\n");
    assert_output("foreach \"ab [print ?]", "a\nb\n");
    assert_output("make \"i 0\nrepeat 4 [make \"i :i + 2]\nprint :i", "8\n");
}

#[test]
fn repeat_body_sees_updated_variables() {
    assert_output("make \"n 0\nrepeat 2 [make \"n :n + 1 if :n = 2 [print \"second]]",
                  "second\n");
}

#[test]
fn lists_show_numbers_as_written() {
    assert_output("show [007 1.50]\nprint first [2.0 3]\nprint sum 007 1.50", "[007 1.50]\n2.0\n8.5\n");
}

#[test]
fn words_with_spaces_survive_foreach() {
    assert_output("foreach (list \"a\\ b \"c) [show ?]", "a b\nc\n");
}

#[test]
fn unconsumed_value_is_error() {
    assert_failure("1 + 2");
    assert_failure("\"hello");
    assert_failure("to f\n3\nend\nf");
}

#[test]
fn output_outside_procedure_is_error() {
    let (result, _) = run_capturing("output 5");
    assert_eq!(result,
               Err(RuntimeError::OutsideProcedure { name: "output".to_string(),
                                                    line: 1, }));
    assert_failure("stop");
}

#[test]
fn errors_carry_their_line() {
    let (result, out) = run_capturing("print 1\nprint :missing");
    assert_eq!(out, "1\n");
    assert_eq!(result,
               Err(RuntimeError::UndefinedVariable { name: "missing".to_string(),
                                                     line: 2, }));
}

#[test]
fn error_messages_read_like_logo() {
    let (result, _) = run_capturing("print sum 1 \"x");
    assert_eq!(result.unwrap_err().to_string(),
               "Error on line 1: sum doesn't like x as input.");

    let (result, _) = run_capturing("to quiet\nend\nprint quiet");
    assert_eq!(result.unwrap_err().to_string(),
               "Error on line 3: quiet didn't output to print.");
}

#[test]
fn syntax_errors_are_failures() {
    assert_failure("print [1 2");
    assert_failure("print (sum 1 2");
    assert_failure("frobnicate 1");
    assert_failure("to print :x\nend");
    assert_failure("to half :x\noutput :x / 2");
    assert_failure("print 1.2.3");
    assert_failure("print 2 @ 3");
}

#[test]
fn unknown_procedure_inside_a_list_fails_only_when_run() {
    assert_success("if \"false [frobnicate]");
    assert_failure("run [frobnicate]");
}

#[test]
fn unimplemented_primitives_fail() {
    assert_failure("print gensym");
    assert_failure("make \"a array 3");
}

#[test]
fn procedures_persist_between_runs() {
    let mut context = Context::new().with_output(std::io::sink());
    context.run_source("to square :x\noutput :x * :x\nend").unwrap();
    context.run_source("make \"s square 7").unwrap();
    assert_eq!(context.global_env().lookup("s"), Some(Value::Number(49.0)));
}
