use crate::constants::STACK_DEPTH;
use crate::error::StackFault;

/// # Call Stack
/// Return addresses for up to 16 nested subroutine calls.
/// `sp` is the number of addresses on the stack, so it's always in `0..=16`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CallStack {
    addresses: [u16; STACK_DEPTH],
    sp: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            addresses: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), StackFault> {
        let slot = self
            .addresses
            .get_mut(self.sp)
            .ok_or(StackFault::Overflow)?;
        *slot = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, StackFault> {
        self.sp = self.sp.checked_sub(1).ok_or(StackFault::Underflow)?;
        Ok(self.addresses[self.sp])
    }

    pub fn sp(&self) -> usize {
        self.sp
    }

    /// The addresses currently on the stack, oldest first.
    pub fn frames(&self) -> &[u16] {
        &self.addresses[..self.sp]
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}
