use log::info;

use crate::{
  block::{Address, AllocatedBlock, Pid},
  error::SimError,
};

/// Internal identity of a table entry.
///
/// User-facing ids may repeat (`create 5` twice registers two processes),
/// so the table hands out a serial key per entry to tell a shadowed entry
/// from the one shadowing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessKey(u64);

#[derive(Debug, Clone)]
pub struct Process {
  key: ProcessKey,
  id: Pid,
  blocks: Vec<AllocatedBlock>,
}

impl Process {
  pub fn id(&self) -> Pid {
    self.id
  }

  pub fn key(&self) -> ProcessKey {
    self.key
  }

  pub fn blocks(&self) -> &[AllocatedBlock] {
    &self.blocks
  }

  pub fn allocated_total(&self) -> usize {
    self.blocks.iter().map(|block| block.size).sum()
  }
}

/// Live processes, most recently registered first.
///
/// Lookups by id return the first match from the head, so a duplicate
/// `create` shadows the older entry until the newer one goes away.
#[derive(Debug, Clone, Default)]
pub struct ProcessTable {
  processes: Vec<Process>,
  next_key: u64,
}

impl ProcessTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.processes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.processes.is_empty()
  }

  /// Processes in lookup order.
  pub fn iter(&self) -> impl Iterator<Item = &Process> {
    self.processes.iter()
  }

  pub fn lookup(
    &self,
    id: Pid,
  ) -> Option<ProcessKey> {
    self.find(id).map(Process::key)
  }

  pub fn find(
    &self,
    id: Pid,
  ) -> Option<&Process> {
    self.processes.iter().find(|process| process.id == id)
  }

  pub fn get(
    &self,
    key: ProcessKey,
  ) -> Option<&Process> {
    self.processes.iter().find(|process| process.key == key)
  }

  pub fn contains(
    &self,
    key: ProcessKey,
  ) -> bool {
    self.get(key).is_some()
  }

  /// Registers a new, empty process even when `id` is already taken.
  pub fn create(
    &mut self,
    id: Pid,
  ) -> ProcessKey {
    let key = ProcessKey(self.next_key);
    self.next_key += 1;
    self.processes.insert(
      0,
      Process {
        key,
        id,
        blocks: Vec::new(),
      },
    );
    info!("registered process {}", id);
    key
  }

  pub fn get_or_create(
    &mut self,
    id: Pid,
  ) -> ProcessKey {
    match self.lookup(id) {
      Some(key) => key,
      None => self.create(id),
    }
  }

  /// Records a block for the process. Unknown keys are ignored.
  pub fn add_block(
    &mut self,
    key: ProcessKey,
    start: Address,
    size: usize,
  ) {
    if let Some(process) = self.get_mut(key) {
      let owner = process.id;
      process.blocks.push(AllocatedBlock::new(start, size, owner));
    }
  }

  /// Removes the block starting at `start` from the first process named
  /// `id` and returns its size.
  ///
  /// The process is deregistered once it owns no blocks.
  pub fn remove_block(
    &mut self,
    id: Pid,
    start: Address,
  ) -> Result<usize, SimError> {
    let index = self
      .processes
      .iter()
      .position(|process| process.id == id)
      .ok_or(SimError::ProcessNotFound(id))?;
    let process = &mut self.processes[index];

    let Some(position) = process.blocks.iter().position(|block| block.start == start) else {
      return Err(SimError::BlockNotFound { pid: id, address: start });
    };

    let block = process.blocks.remove(position);
    if process.blocks.is_empty() {
      let process = self.processes.remove(index);
      info!("process {} owns no memory anymore, deregistered", process.id);
    }
    Ok(block.size)
  }

  /// Drops the entry for `key`, returning the blocks it still owned.
  pub fn deregister(
    &mut self,
    key: ProcessKey,
  ) -> Option<Vec<AllocatedBlock>> {
    let index = self.index_of(key)?;
    let process = self.processes.remove(index);
    info!("deregistered process {}", process.id);
    Some(process.blocks)
  }

  fn index_of(
    &self,
    key: ProcessKey,
  ) -> Option<usize> {
    self.processes.iter().position(|process| process.key == key)
  }

  fn get_mut(
    &mut self,
    key: ProcessKey,
  ) -> Option<&mut Process> {
    self.processes.iter_mut().find(|process| process.key == key)
  }
}
