
mod failure_policy;
mod help;
mod parse;
