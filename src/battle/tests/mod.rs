#[cfg(test)]
mod common;



#[cfg(test)]
mod test_tie_break;
