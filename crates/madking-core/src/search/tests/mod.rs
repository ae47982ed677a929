mod equivalence;
