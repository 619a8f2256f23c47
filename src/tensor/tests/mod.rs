mod mat_mul;
mod new;
mod shape;
