
use std::collections::HashMap;
use std::fmt;

use gc::{Finalize, Trace};

use crate::error::Error;
use crate::value::Value;

/// Name-to-value bindings for one activation.
///
/// Cloning an `Environment` is the scoping primitive of the language: a
/// procedure body runs in a full copy of the caller's bindings taken at
/// application time, so a `define` inside the call never leaks back out,
/// and a lambda captures nothing when it is created.
#[derive(Clone, Debug)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn from_hashmap(bindings: HashMap<String, Value>) -> Environment {
        Environment { bindings }
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }
}

/// The finite set of syntactic keywords. A list head is classified once,
/// here, rather than compared against name strings all over `eval`.
#[derive(Clone, Copy, Debug, PartialEq)]
enum SpecialForm {
    Lambda,
    If,
    Define,
    Begin,
}

impl SpecialForm {
    fn classify(name: &str) -> Option<SpecialForm> {
        match name {
            "lambda" => Some(SpecialForm::Lambda),
            "if" => Some(SpecialForm::If),
            "define" => Some(SpecialForm::Define),
            "begin" => Some(SpecialForm::Begin),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Finalize, PartialEq, Trace)]
pub struct Procedure(ProcEnum);

#[derive(Clone, Debug, Finalize, PartialEq, Trace)]
enum ProcEnum {
    Primitive(Primitive),
    Lambda(Lambda),
}

pub type PrimitiveFn = fn(Vec<Value>) -> Result<Value, Error>;

#[derive(Clone, Copy, Debug, Finalize, PartialEq)]
struct Primitive(PrimitiveFn);

unsafe impl Trace for Primitive {
    gc::unsafe_empty_trace!();
}

#[derive(Clone, Debug, Finalize, PartialEq, Trace)]
struct Lambda {
    params: Vec<String>,
    body: Value,
}

impl Value {
    pub fn eval(&self, env: &mut Environment) -> Result<Value, Error> {
        if let Some(name) = self.as_symbol() {
            env.lookup(name)
                .ok_or_else(|| Error::UnboundSymbol(name.to_string()))
        } else if let Some(nodes) = self.as_list() {
            let (operator, operands) = match nodes.split_first() {
                Some(pair) => pair,
                None => return Err(Error::EmptyApplication),
            };

            if let Some(name) = operator.as_symbol() {
                if let Some(form) = SpecialForm::classify(name) {
                    return eval_special(form, operands, env);
                }
            }

            // Procedure call: operator first, then arguments left to right,
            // all against the current environment.
            let procedure = operator.eval(env)?;
            let mut args = Vec::with_capacity(operands.len());
            for operand in operands {
                args.push(operand.eval(env)?);
            }
            match procedure.as_procedure() {
                Some(procc) => procc.apply(args, env),
                None => Err(Error::NotCallable(procedure.to_string())),
            }
        } else {
            // Integer, float and string literals evaluate to themselves.
            Ok(self.clone())
        }
    }
}

fn eval_special(form: SpecialForm, operands: &[Value], env: &mut Environment)
    -> Result<Value, Error> {

    match form {
        SpecialForm::Lambda => {
            if operands.len() != 2 {
                return Err(Error::MalformedSpecialForm("lambda"));
            }
            let params = lambda_params(&operands[0])?;
            let body = operands[1].clone();
            Ok(Value::procedure(Procedure::lambda(params, body)))
        }
        SpecialForm::If => {
            if operands.len() != 2 && operands.len() != 3 {
                return Err(Error::MalformedSpecialForm("if"));
            }
            if operands[0].eval(env)?.truthy() {
                operands[1].eval(env)
            } else if let Some(alternative) = operands.get(2) {
                alternative.eval(env)
            } else {
                Ok(Value::nothing())
            }
        }
        SpecialForm::Define => {
            if operands.len() != 2 {
                return Err(Error::MalformedSpecialForm("define"));
            }
            let name = operands[0]
                .as_symbol()
                .ok_or(Error::MalformedSpecialForm("define"))?;
            let value = operands[1].eval(env)?;
            env.insert(name, value);
            Ok(Value::nothing())
        }
        SpecialForm::Begin => {
            for operand in operands {
                operand.eval(env)?;
            }
            Ok(Value::nothing())
        }
    }
}

fn lambda_params(node: &Value) -> Result<Vec<String>, Error> {
    let nodes = node
        .as_list()
        .ok_or(Error::MalformedSpecialForm("lambda"))?;
    let mut params = Vec::with_capacity(nodes.len());
    for node in nodes {
        let name = node
            .as_symbol()
            .ok_or(Error::MalformedSpecialForm("lambda"))?;
        params.push(name.to_string());
    }
    Ok(params)
}

impl Procedure {
    pub fn primitive(f: PrimitiveFn) -> Procedure {
        Procedure(ProcEnum::Primitive(Primitive(f)))
    }

    fn lambda(params: Vec<String>, body: Value) -> Procedure {
        Procedure(ProcEnum::Lambda(Lambda { params, body }))
    }

    fn apply(&self, args: Vec<Value>, env: &Environment)
        -> Result<Value, Error> {

        match self.0 {
            ProcEnum::Primitive(Primitive(f)) => f(args),
            ProcEnum::Lambda(ref lambda) => {
                if args.len() != lambda.params.len() {
                    return Err(Error::ArityMismatch {
                        expected: lambda.params.len(),
                        got: args.len(),
                    });
                }
                let mut call_env = env.clone();
                for (param, arg) in lambda.params.iter().zip(args) {
                    call_env.insert(param, arg);
                }
                lambda.body.eval(&mut call_env)
            }
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            ProcEnum::Primitive(_) => write!(f, "#<primitive>"),
            ProcEnum::Lambda(ref lambda) => {
                write!(f, "(lambda (")?;
                for (n, param) in lambda.params.iter().enumerate() {
                    if n > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") {})", lambda.body)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::builtin::initial_environment;
    use crate::error::Error;
    use crate::read::read;
    use crate::value::Value;

    fn comparison(input: &str, expected: Value) {
        let expr = read(input).unwrap();
        let mut env = initial_environment();
        assert_eq!(expr.eval(&mut env).unwrap(), expected);
    }

    fn failure(input: &str, expected: Error) {
        let expr = read(input).unwrap();
        let mut env = initial_environment();
        assert_eq!(expr.eval(&mut env), Err(expected));
    }

    #[test]
    fn test_flat_application() {
        comparison("(+ 1 2)", Value::int(3));
    }

    #[test]
    fn test_nested_application() {
        comparison("(+ (* 2 3) (- 7 2))", Value::int(11));
    }

    #[test]
    fn test_lambda_application() {
        comparison("((lambda (n) (* n n)) 6)", Value::int(36));
    }

    #[test]
    fn test_lambda_arity_too_few() {
        failure(
            "((lambda (n) (* n n)))",
            Error::ArityMismatch { expected: 1, got: 0 });
    }

    #[test]
    fn test_lambda_arity_too_many() {
        failure(
            "((lambda (n) (* n n)) 1 2 3)",
            Error::ArityMismatch { expected: 1, got: 3 });
    }

    #[test]
    fn test_if_empty_string_is_truthy() {
        comparison("(if '' 'a' 'b')", Value::string("a"));
    }

    #[test]
    fn test_if_false_takes_alternative() {
        comparison("(if (> 1 2) 'a' 'b')", Value::string("b"));
    }

    #[test]
    fn test_if_false_without_alternative() {
        comparison("(if (> 1 2) 'a')", Value::nothing());
    }

    #[test]
    fn test_define_binds_in_current_environment() {
        let mut env = initial_environment();
        read("(define x 5)").unwrap().eval(&mut env).unwrap();
        assert_eq!(Value::symbol("x").eval(&mut env), Ok(Value::int(5)));
    }

    #[test]
    fn test_define_invisible_in_earlier_copy() {
        let mut env = initial_environment();
        let mut copy_before = env.clone();
        read("(define x 5)").unwrap().eval(&mut env).unwrap();
        assert_eq!(
            Value::symbol("x").eval(&mut copy_before),
            Err(Error::UnboundSymbol("x".to_string())));
    }

    #[test]
    fn test_callee_define_stays_local() {
        let mut env = initial_environment();
        read("(begin (define f (lambda (z) (define y 7))) (f 1))")
            .unwrap()
            .eval(&mut env)
            .unwrap();
        assert_eq!(
            Value::symbol("y").eval(&mut env),
            Err(Error::UnboundSymbol("y".to_string())));
    }

    #[test]
    fn test_lambda_does_not_capture_definition_environment() {
        failure(
            "(((lambda (x) (lambda (y) x)) 1) 2)",
            Error::UnboundSymbol("x".to_string()));
    }

    #[test]
    fn test_lambda_sees_caller_bindings() {
        let mut env = initial_environment();
        read("(define x 2)").unwrap().eval(&mut env).unwrap();
        read("(define f (lambda (y) (* x y)))")
            .unwrap()
            .eval(&mut env)
            .unwrap();
        assert_eq!(
            read("(f 3)").unwrap().eval(&mut env),
            Ok(Value::int(6)));
    }

    #[test]
    fn test_begin_discards_results() {
        comparison("(begin 1 2 3)", Value::nothing());
        comparison("(begin)", Value::nothing());
    }

    #[test]
    fn test_begin_threads_defines() {
        let mut env = initial_environment();
        read("(begin (define x 2) (define x (* x 3)))")
            .unwrap()
            .eval(&mut env)
            .unwrap();
        assert_eq!(Value::symbol("x").eval(&mut env), Ok(Value::int(6)));
    }

    #[test]
    fn test_unbound_symbol() {
        failure(
            "(print undefined_name)",
            Error::UnboundSymbol("undefined_name".to_string()));
    }

    #[test]
    fn test_not_callable() {
        failure("(1 2)", Error::NotCallable("1".to_string()));
    }

    #[test]
    fn test_empty_application() {
        failure("()", Error::EmptyApplication);
        failure("(())", Error::EmptyApplication);
    }

    #[test]
    fn test_malformed_lambda() {
        failure("(lambda (n))", Error::MalformedSpecialForm("lambda"));
        failure("(lambda 1 2)", Error::MalformedSpecialForm("lambda"));
        failure("(lambda (1) 2)", Error::MalformedSpecialForm("lambda"));
    }

    #[test]
    fn test_malformed_define() {
        failure("(define x)", Error::MalformedSpecialForm("define"));
        failure("(define 1 2)", Error::MalformedSpecialForm("define"));
    }

    #[test]
    fn test_malformed_if() {
        failure("(if (> 1 2))", Error::MalformedSpecialForm("if"));
    }

    #[test]
    fn test_lambda_display() {
        let mut env = initial_environment();
        let procc = read("(lambda (n) (* n n))")
            .unwrap()
            .eval(&mut env)
            .unwrap();
        assert_eq!(procc.to_string(), "(lambda (n) (* n n))");
    }
}
