pub mod polynomial;
pub mod primes;
pub mod ring;
pub mod sampling;
pub mod vector_matrix;
pub mod zq;
