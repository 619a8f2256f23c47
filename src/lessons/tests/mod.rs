mod autograd;
mod regression;
mod samples;
