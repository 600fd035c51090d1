mod edits;
mod golden;
