use crate::{vm::BrainfuckVM, vm_error::VMError};
use bfi_types::state::{VMState, VMStateFinal};

// Facilitates step-by-step execution of a Brainfuck program, yielding the state after each step.
// This is particularly useful for debugging.
pub struct VMIterator<'vm, 'a> {
    vm: &'vm mut BrainfuckVM<'a>,
    final_state: Option<VMStateFinal>,
    done: bool,
}

impl<'vm, 'a> VMIterator<'vm, 'a> {
    pub fn new(vm: &'vm mut BrainfuckVM<'a>) -> Self {
        VMIterator {
            vm,
            final_state: None,
            done: false,
        }
    }

    /// Set once the program has run off the end without an error.
    pub fn final_state(&self) -> Option<&VMStateFinal> {
        self.final_state.as_ref()
    }
}

// Iterate one step at a time. The iteration ends (returning None) at the end of the
// program, or right after yielding the first error.
impl<'vm, 'a> Iterator for VMIterator<'vm, 'a> {
    type Item = Result<VMState, VMError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.vm.interpret_step() {
            Ok(Some(state)) => Some(Ok(state)),
            Ok(None) => {
                self.done = true;
                self.final_state = Some(self.vm.final_state());
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
