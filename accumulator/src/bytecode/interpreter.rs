use super::{Class, Instruction, Method};
use crate::error::{Error, Result};

/// Outcome of a method invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Value returned by `ireturn`, `None` after a plain `return`
    pub result: Option<i32>,

    /// Local variables of the finished frame
    pub locals: Vec<i32>,
}

/// Executes static methods of a single class
///
/// Only `int` values are modelled. Reference arguments, such as the `argv`
/// of `main`, occupy a local slot holding 0. Arithmetic wraps like the JVM's.
pub struct Interpreter<'a> {
    class: &'a Class,
    step_limit: u64,
    depth_limit: usize,
    steps: u64,
    depth: usize,
}
//
impl<'a> Interpreter<'a> {
    pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;
    pub const DEFAULT_DEPTH_LIMIT: usize = 256;

    pub fn new(class: &'a Class) -> Self {
        Self {
            class,
            step_limit: Self::DEFAULT_STEP_LIMIT,
            depth_limit: Self::DEFAULT_DEPTH_LIMIT,
            steps: 0,
            depth: 0,
        }
    }

    /// Maximal number of instructions executed over the interpreter's life
    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Maximal number of nested frames
    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    /// Instructions executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn invoke(&mut self, name: &str, descriptor: &str, args: &[i32]) -> Result<Completion> {
        let class = self.class;
        let method = class.method(name, descriptor)?;
        let (params, _) = method.signature()?;
        if args.len() != params {
            return Err(Error::ArgumentCount {
                expected: params,
                found: args.len(),
            });
        }
        self.execute(method, args)
    }

    /// Run `main(String[])` with a null argument array
    pub fn run_main(&mut self) -> Result<Completion> {
        self.invoke("main", "([Ljava/lang/String;)V", &[0])
    }

    fn execute(&mut self, method: &'a Method, args: &[i32]) -> Result<Completion> {
        if self.depth >= self.depth_limit {
            return Err(Error::CallDepth {
                limit: self.depth_limit,
            });
        }
        tracing::debug!(method = %method.name, ?args, "invoke");

        let code = method.instructions()?;
        let mut locals = vec![0; usize::from(method.max_locals).max(args.len())];
        locals[..args.len()].copy_from_slice(args);
        let mut stack = Vec::new();

        self.depth += 1;
        let result = self.run(method, &code, &mut locals, &mut stack);
        self.depth -= 1;
        result.map(|result| Completion { result, locals })
    }

    fn run(
        &mut self,
        method: &'a Method,
        code: &[(usize, Instruction)],
        locals: &mut [i32],
        stack: &mut Vec<i32>,
    ) -> Result<Option<i32>> {
        use Instruction::*;
        let mut pc = 0;
        loop {
            let &(offset, instruction) = code.get(pc).ok_or_else(|| Error::MissingReturn {
                method: method.name.clone(),
            })?;
            self.steps += 1;
            if self.steps > self.step_limit {
                return Err(Error::StepLimit {
                    limit: self.step_limit,
                });
            }
            tracing::trace!(method = %method.name, offset, %instruction);
            pc += 1;

            match instruction {
                Nop => {}
                IConst(value) => stack.push(value),
                BiPush(value) => stack.push(i32::from(value)),
                SiPush(value) => stack.push(i32::from(value)),
                ILoad(index) => stack.push(*local(locals, index)?),
                IStore(index) => {
                    let value = pop(stack, offset)?;
                    *local(locals, index)? = value;
                }
                Pop => {
                    pop(stack, offset)?;
                }
                Dup => {
                    let value = pop(stack, offset)?;
                    stack.extend([value, value]);
                }
                IAdd | ISub | IMul => {
                    let rhs = pop(stack, offset)?;
                    let lhs = pop(stack, offset)?;
                    stack.push(match instruction {
                        IAdd => lhs.wrapping_add(rhs),
                        ISub => lhs.wrapping_sub(rhs),
                        _ => lhs.wrapping_mul(rhs),
                    });
                }
                IInc { index, delta } => {
                    let slot = local(locals, index)?;
                    *slot = slot.wrapping_add(i32::from(delta));
                }
                If { condition, offset: relative } => {
                    if condition.holds(pop(stack, offset)?, 0) {
                        pc = branch(code, offset, relative)?;
                    }
                }
                IfICmp { condition, offset: relative } => {
                    let rhs = pop(stack, offset)?;
                    let lhs = pop(stack, offset)?;
                    if condition.holds(lhs, rhs) {
                        pc = branch(code, offset, relative)?;
                    }
                }
                Goto(relative) => pc = branch(code, offset, relative)?,
                IReturn => return pop(stack, offset).map(Some),
                Return => return Ok(None),
                InvokeStatic(index) => {
                    let class = self.class;
                    let callee = class.resolve(index)?;
                    let (params, _) = callee.signature()?;
                    if stack.len() < params {
                        return Err(Error::StackUnderflow { offset });
                    }
                    let args = stack.split_off(stack.len() - params);
                    if let Some(value) = self.execute(callee, &args)?.result {
                        stack.push(value);
                    }
                }
            }
        }
    }
}

fn pop(stack: &mut Vec<i32>, offset: usize) -> Result<i32> {
    stack.pop().ok_or(Error::StackUnderflow { offset })
}

fn local(locals: &mut [i32], index: u8) -> Result<&mut i32> {
    locals
        .get_mut(usize::from(index))
        .ok_or(Error::BadLocal { index })
}

/// Instruction index of a branch target
fn branch(code: &[(usize, Instruction)], offset: usize, relative: i16) -> Result<usize> {
    let target = offset as isize + isize::from(relative);
    code.binary_search_by_key(&target, |&(offset, _)| offset as isize)
        .map_err(|_| Error::BadBranch { target })
}
